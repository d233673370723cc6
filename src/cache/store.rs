//! Cache Store Module
//!
//! Bounded cache instance combining a key table with an LRU recency list and
//! validity/expiration based lookups.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::cache::lru::{NodeId, RecencyList};
use crate::cache::scope::resolve_statistics;
use crate::cache::{
    current_timestamp_ms, is_fresh_enough, CacheEntry, CacheKey, CacheStatistics, Expiration,
    Payload, StatisticsScope, Validity,
};

// == Memory Cache ==
/// A named, bounded cache with LRU eviction.
///
/// Every operation runs under one exclusive lock, so the key table and the
/// recency list are always observed in a consistent state. Values are handed
/// out by clone; use `Arc` payloads (the default [`Payload`]) so the cache
/// only ever holds references.
pub struct MemoryCache<K = CacheKey, V = Payload> {
    name: String,
    inner: Mutex<Inner<K, V>>,
}

struct Inner<K, V> {
    /// Key table, pointing into the recency list
    entries: HashMap<K, NodeId>,
    /// Entries ordered from most to least recently used
    recency: RecencyList<CacheEntry<K, V>>,
    max_size: usize,
}

impl<K, V> Inner<K, V>
where
    K: Eq + Hash,
{
    fn evict_oldest(&mut self) -> bool {
        match self.recency.pop_back() {
            Some(evicted) => {
                self.entries.remove(&evicted.key);
                true
            }
            None => false,
        }
    }
}

// == Cache Summary ==
/// Name and sizes of a cache, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheSummary {
    pub name: String,
    pub current_size: usize,
    pub max_size: usize,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `max_size` entries.
    ///
    /// A cache of size 0 never stores anything.
    pub fn new(name: impl Into<String>, max_size: usize) -> Self {
        Self {
            name: name.into(),
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                recency: RecencyList::new(),
                max_size,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Put ==
    /// Stores `value` under `key` with the given validity.
    ///
    /// An existing entry is updated in place and becomes the most recently
    /// used. A new entry evicts the least recently used one when the cache is
    /// full. Does nothing if the maximum size is 0.
    pub fn put(&self, scope: Option<&dyn StatisticsScope>, key: K, validity: Validity, value: V) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        if inner.max_size == 0 {
            return;
        }

        let statistics = self.statistics(scope, inner);
        if let Some(statistics) = &statistics {
            statistics.record_add();
        }

        match inner.entries.get(&key).copied() {
            Some(id) => {
                if let Some(entry) = inner.recency.get_mut(id) {
                    entry.update(validity, value);
                }
                inner.recency.move_to_front(id);
            }
            None => {
                if inner.entries.len() >= inner.max_size && inner.evict_oldest() {
                    debug!("Cache '{}' full, evicted least recently used entry", self.name);
                    if let Some(statistics) = &statistics {
                        statistics.record_eviction();
                    }
                }
                let id = inner
                    .recency
                    .push_front(CacheEntry::new(key.clone(), validity, value));
                inner.entries.insert(key, id);
            }
        }

        if let Some(statistics) = &statistics {
            statistics.set_sizes(inner.entries.len(), inner.max_size);
        }
    }

    // == Remove ==
    /// Removes the entry for `key`. Returns whether an entry was removed.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        match inner.entries.remove(key) {
            Some(id) => {
                inner.recency.remove(id);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Drops every entry and returns how many there were.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let cleared = inner.entries.len();
        inner.entries.clear();
        inner.recency.clear();
        debug!("Cache '{}' cleared {} entries", self.name, cleared);
        cleared
    }

    // == Find Valid ==
    /// Returns the value for `key` if its stored validity satisfies
    /// `requested`, promoting the entry to most recently used.
    pub fn find_valid<Q>(
        &self,
        scope: Option<&dyn StatisticsScope>,
        key: &Q,
        requested: &Validity,
    ) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.find_with(scope, key, |stored| is_fresh_enough(requested, stored))
    }

    // == Find Valid With Expiration ==
    /// Returns the value for `key` if its timestamp has not expired under
    /// `expiration` at the current time.
    ///
    /// Entries whose validity is not a plain timestamp always miss.
    pub fn find_valid_with_expiration<Q>(
        &self,
        scope: Option<&dyn StatisticsScope>,
        key: &Q,
        expiration: Expiration,
    ) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.find_valid_with_expiration_at(scope, key, expiration, current_timestamp_ms())
    }

    /// Same as [`find_valid_with_expiration`](Self::find_valid_with_expiration)
    /// with an explicit clock reading in milliseconds.
    pub fn find_valid_with_expiration_at<Q>(
        &self,
        scope: Option<&dyn StatisticsScope>,
        key: &Q,
        expiration: Expiration,
        now: i64,
    ) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.find_with(scope, key, |stored| {
            stored
                .as_timestamp()
                .map(|timestamp| expiration.is_live(timestamp, now))
                .unwrap_or(false)
        })
    }

    // == Set Max Size ==
    /// Changes the maximum size, evicting least recently used entries until
    /// the cache fits. Returns the number of entries evicted.
    pub fn set_max_size(&self, max_size: usize) -> usize {
        let mut inner = self.inner.lock();
        if inner.max_size == max_size {
            return 0;
        }

        let mut evicted = 0;
        while inner.entries.len() > max_size && inner.evict_oldest() {
            evicted += 1;
        }
        debug!(
            "Cache '{}' resized from {} to {}, evicted {} entries",
            self.name, inner.max_size, max_size, evicted
        );
        inner.max_size = max_size;
        evicted
    }

    // == Snapshots ==
    /// Keys at call time, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        let inner = self.inner.lock();
        inner.recency.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Values at call time, most recently used first.
    pub fn values(&self) -> Vec<V> {
        let inner = self.inner.lock();
        inner.recency.iter().map(|entry| entry.value.clone()).collect()
    }

    // == Statistics ==
    /// Returns the statistics for this cache within `scope`, creating them
    /// on first use.
    pub fn statistics_for(&self, scope: &dyn StatisticsScope) -> Arc<CacheStatistics> {
        let inner = self.inner.lock();
        let statistics = resolve_statistics(scope, &self.name, inner.entries.len(), inner.max_size);
        statistics.set_sizes(inner.entries.len(), inner.max_size);
        statistics
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().entries.contains_key(key)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.inner.lock().max_size
    }

    pub fn summary(&self) -> CacheSummary {
        let inner = self.inner.lock();
        CacheSummary {
            name: self.name.clone(),
            current_size: inner.entries.len(),
            max_size: inner.max_size,
        }
    }

    fn statistics(
        &self,
        scope: Option<&dyn StatisticsScope>,
        inner: &Inner<K, V>,
    ) -> Option<Arc<CacheStatistics>> {
        scope.map(|scope| resolve_statistics(scope, &self.name, inner.entries.len(), inner.max_size))
    }

    fn find_with<Q, F>(&self, scope: Option<&dyn StatisticsScope>, key: &Q, is_fresh: F) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        F: FnOnce(&Validity) -> bool,
    {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let statistics = self.statistics(scope, inner);

        let hit = inner.entries.get(key).copied().and_then(|id| {
            let entry = inner.recency.get(id)?;
            is_fresh(&entry.validity).then(|| (id, entry.value.clone()))
        });

        let result = match hit {
            Some((id, value)) => {
                inner.recency.move_to_front(id);
                if let Some(statistics) = &statistics {
                    statistics.record_hit();
                }
                Some(value)
            }
            None => {
                if let Some(statistics) = &statistics {
                    statistics.record_miss();
                }
                None
            }
        };

        if let Some(statistics) = &statistics {
            statistics.set_sizes(inner.entries.len(), inner.max_size);
        }
        result
    }
}

impl<K, V> std::fmt::Debug for MemoryCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MemoryCache")
            .field("name", &self.name)
            .field("len", &inner.entries.len())
            .field("max_size", &inner.max_size)
            .finish()
    }
}
