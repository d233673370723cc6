//! API Routes
//!
//! Configures the Axum router for the cache admin endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    clear_handler, health_handler, list_handler, resize_handler, summary_handler, AppState,
};

/// Creates the admin router.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /caches` - Name and sizes of every cache
/// - `GET /caches/:name` - Name and sizes of one cache
/// - `PUT /caches/:name/max-size` - Change the maximum size
/// - `DELETE /caches/:name/entries` - Drop every entry
///
/// The router can be served on its own or nested into a host application.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/caches", get(list_handler))
        .route("/caches/:name", get(summary_handler))
        .route("/caches/:name/max-size", put(resize_handler))
        .route("/caches/:name/entries", delete(clear_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
