//! Object Cache - A bounded in-process object cache
//!
//! Stores computed artifacts against a key and a validity marker, evicts the
//! least recently used entry when full, and keeps named instances in a
//! process-wide registry.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{
    instance, named_instance, CacheKey, CacheRegistry, Expiration, MemoryCache, Payload,
    RequestScope, StatisticsScope, Validity,
};
pub use config::{Config, EnvProperties, MapProperties, PropertySource};
pub use error::{CacheError, Result};
