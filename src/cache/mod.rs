//! Cache Module
//!
//! Bounded in-process caching with LRU eviction, validity-based freshness and
//! a registry of named instances.

mod entry;
mod lru;
mod registry;
mod scope;
mod stats;
mod store;
mod validity;


// Re-export public types
pub use entry::{payload, CacheEntry, CacheKey, Payload};
pub use lru::{NodeId, RecencyList};
pub use registry::{
    global, instance, named_instance, size_property, CacheRegistry, DEFAULT_MAIN_SIZE,
    MAIN_CACHE_NAME,
};
pub use scope::{statistics_attribute, RequestScope, StatisticsScope, STATISTICS_ATTRIBUTE_PREFIX};
pub use stats::{CacheStatistics, StatsSnapshot};
pub use store::{CacheSummary, MemoryCache};
pub use validity::{current_timestamp_ms, is_fresh_enough, Expiration, Validity};
