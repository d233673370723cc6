//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /caches` - List caches
//! - `GET /caches/:name` - Describe one cache
//! - `PUT /caches/:name/max-size` - Resize a cache
//! - `DELETE /caches/:name/entries` - Clear a cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
