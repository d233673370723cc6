//! Cache Statistics Module
//!
//! Tracks hits, misses, adds and evictions for one cache within one scope.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

// == Cache Statistics ==
/// Counters for one (scope, cache name) pair.
///
/// Shared through the scope as an `Arc`, so counters are atomics. The cache
/// only updates them while holding its own lock.
///
/// `current_size` and `max_size` are as of the last touch: they are refreshed
/// by scoped operations and by `statistics_for`, not by unscoped calls or
/// `set_max_size`.
#[derive(Debug, Default)]
pub struct CacheStatistics {
    hits: AtomicU64,
    misses: AtomicU64,
    adds: AtomicU64,
    evictions: AtomicU64,
    current_size: AtomicUsize,
    max_size: AtomicUsize,
}

impl CacheStatistics {
    // == Constructor ==
    /// Creates statistics with zeroed counters, seeded with the cache sizes.
    pub fn new(current_size: usize, max_size: usize) -> Self {
        Self {
            current_size: AtomicUsize::new(current_size),
            max_size: AtomicUsize::new(max_size),
            ..Self::default()
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn adds(&self) -> u64 {
        self.adds.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Cache size as of the last operation that touched these statistics.
    pub fn current_size(&self) -> usize {
        self.current_size.load(Ordering::Relaxed)
    }

    pub fn max_size(&self) -> usize {
        self.max_size.load(Ordering::Relaxed)
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_add(&self) {
        self.adds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn set_sizes(&self, current_size: usize, max_size: usize) {
        self.current_size.store(current_size, Ordering::Relaxed);
        self.max_size.store(max_size, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the counters into a plain serializable value.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            adds: self.adds(),
            evictions: self.evictions(),
            current_size: self.current_size(),
            max_size: self.max_size(),
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time copy of [`CacheStatistics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Lookups that returned a value
    pub hits: u64,
    /// Lookups that returned nothing (absent, stale or expired)
    pub misses: u64,
    /// Calls to put, including updates of existing keys
    pub adds: u64,
    /// Entries evicted by put to make room
    pub evictions: u64,
    pub current_size: usize,
    pub max_size: usize,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStatistics::new(3, 10);
        let snapshot = stats.snapshot();

        assert_eq!(snapshot.hits, 0);
        assert_eq!(snapshot.misses, 0);
        assert_eq!(snapshot.adds, 0);
        assert_eq!(snapshot.evictions, 0);
        assert_eq!(snapshot.current_size, 3);
        assert_eq!(snapshot.max_size, 10);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(StatsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStatistics::default();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.snapshot().hit_rate(), 0.75);
    }

    #[test]
    fn test_record_add_and_eviction() {
        let stats = CacheStatistics::default();
        stats.record_add();
        stats.record_add();
        stats.record_eviction();

        assert_eq!(stats.adds(), 2);
        assert_eq!(stats.evictions(), 1);
    }

    #[test]
    fn test_set_sizes() {
        let stats = CacheStatistics::new(0, 5);
        stats.set_sizes(4, 8);

        assert_eq!(stats.current_size(), 4);
        assert_eq!(stats.max_size(), 8);
    }

    #[test]
    fn test_snapshot_serializes() {
        let stats = CacheStatistics::new(1, 2);
        stats.record_hit();

        let json = serde_json::to_value(stats.snapshot()).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["max_size"], 2);
    }
}
