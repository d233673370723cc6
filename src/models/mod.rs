//! Request and Response models for the admin API
//!
//! DTOs used to serialize/deserialize HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ResizeRequest;
pub use responses::{CacheListResponse, ClearResponse, HealthResponse, ResizeResponse};
