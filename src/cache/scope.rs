//! Statistics Scope Module
//!
//! Binds cache statistics to an external unit of work (typically a request).

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::CacheStatistics;

/// Prefix of the attribute name statistics are stored under in a scope.
pub const STATISTICS_ATTRIBUTE_PREFIX: &str = "memory-cache-statistics.";

// == Statistics Scope ==
/// A caller-owned key/value store that cache statistics are kept in.
///
/// The cache never retains a scope. It is passed to each operation only to
/// find (or create) the statistics object for that cache, so counters are
/// observable per unit of work and dropped along with it.
///
/// Both methods are called with the cache's lock held, and that lock is not
/// re-entrant. Implementations must not call back into the same cache.
pub trait StatisticsScope {
    /// Returns the attribute stored under `name`, if any.
    fn attribute(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>>;

    /// Stores `value` under `name`, replacing any previous attribute.
    fn set_attribute(&self, name: &str, value: Arc<dyn Any + Send + Sync>);
}

/// Attribute name for the statistics of `cache_name`.
pub fn statistics_attribute(cache_name: &str) -> String {
    format!("{}{}", STATISTICS_ATTRIBUTE_PREFIX, cache_name)
}

// == Resolve ==
/// Looks up the statistics for `cache_name` in `scope`, creating and storing
/// zeroed statistics seeded with the given sizes if there are none yet.
///
/// An attribute of another type under the same name is replaced.
pub(crate) fn resolve_statistics(
    scope: &dyn StatisticsScope,
    cache_name: &str,
    current_size: usize,
    max_size: usize,
) -> Arc<CacheStatistics> {
    let attribute = statistics_attribute(cache_name);

    if let Some(existing) = scope.attribute(&attribute) {
        if let Ok(statistics) = existing.downcast::<CacheStatistics>() {
            return statistics;
        }
    }

    let statistics = Arc::new(CacheStatistics::new(current_size, max_size));
    scope.set_attribute(&attribute, statistics.clone());
    statistics
}

// == Request Scope ==
/// Thread-safe scope for a single unit of work.
#[derive(Default)]
pub struct RequestScope {
    attributes: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes currently stored.
    pub fn len(&self) -> usize {
        self.attributes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.lock().is_empty()
    }
}

impl StatisticsScope for RequestScope {
    fn attribute(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.attributes.lock().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: Arc<dyn Any + Send + Sync>) {
        self.attributes.lock().insert(name.to_string(), value);
    }
}

impl std::fmt::Debug for RequestScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attributes = self.attributes.lock();
        let mut names: Vec<&String> = attributes.keys().collect();
        names.sort();
        f.debug_struct("RequestScope")
            .field("attributes", &names)
            .finish()
    }
}
