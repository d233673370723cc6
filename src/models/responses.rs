//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheSummary;

/// Response body for GET /caches
#[derive(Debug, Clone, Serialize)]
pub struct CacheListResponse {
    /// Every registered cache, sorted by name
    pub caches: Vec<CacheSummary>,
}

impl CacheListResponse {
    pub fn new(caches: Vec<CacheSummary>) -> Self {
        Self { caches }
    }
}

/// Response body for PUT /caches/:name/max-size
#[derive(Debug, Clone, Serialize)]
pub struct ResizeResponse {
    pub name: String,
    /// Maximum size now in effect
    pub max_size: usize,
    /// Entries evicted to fit the new size
    pub evicted: usize,
}

impl ResizeResponse {
    pub fn new(name: impl Into<String>, max_size: usize, evicted: usize) -> Self {
        Self {
            name: name.into(),
            max_size,
            evicted,
        }
    }
}

/// Response body for DELETE /caches/:name/entries
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    pub name: String,
    /// Number of entries dropped
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(name: impl Into<String>, cleared: usize) -> Self {
        let name = name.into();
        Self {
            message: format!("Cache '{}' cleared {} entries", name, cleared),
            name,
            cleared,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
