//! Error types for the object cache
//!
//! Lookups never fail (absent, stale and expired entries are plain misses);
//! errors only come from configuration and from the admin surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the object cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A configuration property is not an integer
    #[error("Invalid value for property '{name}': {value:?}")]
    InvalidProperty { name: String, value: String },

    /// A configured cache size is out of range
    #[error("Invalid size for cache '{name}': {size}")]
    InvalidSize { name: String, size: i64 },

    /// No cache registered under this name
    #[error("Cache not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidProperty { .. } | CacheError::InvalidSize { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the object cache.
pub type Result<T> = std::result::Result<T, CacheError>;
