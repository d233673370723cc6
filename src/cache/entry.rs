//! Cache Entry Module
//!
//! Defines cache entries and the key/payload types used by the registry.

use std::any::Any;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::cache::Validity;

// == Payload ==
/// Type-erased cached value held by registry caches.
///
/// The cache only holds a reference; dropping an entry drops that reference.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Wraps a value as a [`Payload`].
pub fn payload<T: Any + Send + Sync>(value: T) -> Payload {
    Arc::new(value)
}

// == Cache Key ==
/// Opaque key used by registry caches.
///
/// Cloning is cheap, so the entry table and the recency list can both hold it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Arc<str>);

impl CacheKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({:?})", &*self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for CacheKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

// == Cache Entry ==
/// A single cache entry, stored in a recency list node.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// Key, kept so eviction from the list can find the table slot
    pub key: K,
    /// Validity marker the value was stored with
    pub validity: Validity,
    /// The stored value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    pub fn new(key: K, validity: Validity, value: V) -> Self {
        Self {
            key,
            validity,
            value,
        }
    }

    // == Update ==
    /// Overwrites validity and value in place.
    pub fn update(&mut self, validity: Validity, value: V) {
        self.validity = validity;
        self.value = value;
    }
}
