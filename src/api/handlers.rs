//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints. Handlers only report
//! and manage cache sizes; cached payloads are never exposed.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{CacheRegistry, CacheSummary, MemoryCache};
use crate::error::{CacheError, Result};
use crate::models::{CacheListResponse, ClearResponse, HealthResponse, ResizeRequest, ResizeResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registry whose caches are exposed
    pub registry: Arc<CacheRegistry>,
}

impl AppState {
    /// Creates a new AppState over the given registry.
    pub fn new(registry: Arc<CacheRegistry>) -> Self {
        Self { registry }
    }

    /// Creates an AppState over the process-wide registry.
    pub fn global() -> Self {
        Self::new(crate::cache::global())
    }

    fn cache(&self, name: &str) -> Result<Arc<MemoryCache>> {
        self.registry
            .get(name)
            .ok_or_else(|| CacheError::NotFound(name.to_string()))
    }
}

/// Handler for GET /caches
pub async fn list_handler(State(state): State<AppState>) -> Json<CacheListResponse> {
    Json(CacheListResponse::new(state.registry.summaries()))
}

/// Handler for GET /caches/:name
pub async fn summary_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CacheSummary>> {
    let cache = state.cache(&name)?;
    Ok(Json(cache.summary()))
}

/// Handler for PUT /caches/:name/max-size
///
/// Shrinking evicts least recently used entries until the cache fits.
pub async fn resize_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<ResizeRequest>,
) -> Result<Json<ResizeResponse>> {
    let max_size = req.validate().map_err(CacheError::InvalidRequest)?;
    let cache = state.cache(&name)?;

    let evicted = cache.set_max_size(max_size);
    info!(
        "Cache '{}' resized to {} via admin API, {} evicted",
        name, max_size, evicted
    );

    Ok(Json(ResizeResponse::new(name, cache.max_size(), evicted)))
}

/// Handler for DELETE /caches/:name/entries
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ClearResponse>> {
    let cache = state.cache(&name)?;

    let cleared = cache.clear();
    info!("Cache '{}' cleared via admin API, {} entries", name, cleared);

    Ok(Json(ClearResponse::new(name, cleared)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
