//! Cache Registry Module
//!
//! Named cache instances, created lazily and sized from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::info;

use crate::cache::{CacheSummary, MemoryCache};
use crate::config::{EnvProperties, PropertySource};
use crate::error::{CacheError, Result};

/// Name of the general-purpose cache every registry starts with.
pub const MAIN_CACHE_NAME: &str = "main";

/// Size of the main cache.
pub const DEFAULT_MAIN_SIZE: usize = 200;

/// Property holding the size of the cache called `name`.
pub fn size_property(name: &str) -> String {
    format!("cache.{}.size", name)
}

// == Cache Registry ==
/// Maps cache names to shared cache instances.
///
/// An instance is created the first time its name is requested and lives as
/// long as the registry. Its size is read from the property source once, at
/// creation; later changes go through [`MemoryCache::set_max_size`].
pub struct CacheRegistry {
    main: Arc<MemoryCache>,
    caches: Mutex<HashMap<String, Arc<MemoryCache>>>,
    properties: Box<dyn PropertySource + Send + Sync>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates a registry holding only the main cache.
    pub fn new(properties: impl PropertySource + Send + Sync + 'static) -> Self {
        Self::with_main_size(properties, DEFAULT_MAIN_SIZE)
    }

    pub fn with_main_size(
        properties: impl PropertySource + Send + Sync + 'static,
        main_size: usize,
    ) -> Self {
        let main = Arc::new(MemoryCache::new(MAIN_CACHE_NAME, main_size));
        let mut caches = HashMap::new();
        caches.insert(MAIN_CACHE_NAME.to_string(), main.clone());

        Self {
            main,
            caches: Mutex::new(caches),
            properties: Box::new(properties),
        }
    }

    /// Returns the main cache.
    pub fn main(&self) -> Arc<MemoryCache> {
        self.main.clone()
    }

    // == Instance ==
    /// Returns the cache called `name`, creating it on first use.
    ///
    /// A new cache is sized from the `cache.<name>.size` property, falling
    /// back to `default_size`. Concurrent first calls for the same name get
    /// the same instance.
    pub fn instance(&self, name: &str, default_size: usize) -> Result<Arc<MemoryCache>> {
        let mut caches = self.caches.lock();
        if let Some(cache) = caches.get(name) {
            return Ok(cache.clone());
        }

        let property = size_property(name);
        let default = i64::try_from(default_size).unwrap_or(i64::MAX);
        let size = self.properties.get_int(&property, default)?;
        let max_size = usize::try_from(size).map_err(|_| CacheError::InvalidSize {
            name: name.to_string(),
            size,
        })?;

        info!("Creating cache '{}' with max size {}", name, max_size);
        let cache = Arc::new(MemoryCache::new(name, max_size));
        caches.insert(name.to_string(), cache.clone());
        Ok(cache)
    }

    // == Get ==
    /// Returns the cache called `name` if it has been created.
    pub fn get(&self, name: &str) -> Option<Arc<MemoryCache>> {
        self.caches.lock().get(name).cloned()
    }

    /// Names of all created caches, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Summaries of all created caches, sorted by name.
    pub fn summaries(&self) -> Vec<CacheSummary> {
        let caches: Vec<Arc<MemoryCache>> = self.caches.lock().values().cloned().collect();
        let mut summaries: Vec<CacheSummary> = caches.iter().map(|cache| cache.summary()).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("caches", &self.names())
            .finish()
    }
}

// == Process Registry ==
static GLOBAL: Lazy<Arc<CacheRegistry>> =
    Lazy::new(|| Arc::new(CacheRegistry::new(EnvProperties)));

/// The process-wide registry, sized from environment properties.
pub fn global() -> Arc<CacheRegistry> {
    GLOBAL.clone()
}

/// The process-wide main cache.
pub fn instance() -> Arc<MemoryCache> {
    GLOBAL.main()
}

/// The process-wide cache called `name`, created on first use.
pub fn named_instance(name: &str, default_size: usize) -> Result<Arc<MemoryCache>> {
    GLOBAL.instance(name, default_size)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{payload, CacheKey, Validity};
    use crate::config::MapProperties;
    use std::thread;

    #[test]
    fn test_main_cache_exists() {
        let registry = CacheRegistry::new(MapProperties::new());

        let main = registry.main();
        assert_eq!(main.name(), MAIN_CACHE_NAME);
        assert_eq!(main.max_size(), DEFAULT_MAIN_SIZE);
        assert_eq!(registry.names(), vec!["main"]);
        assert!(Arc::ptr_eq(&main, &registry.instance("main", 1).unwrap()));
    }

    #[test]
    fn test_instance_created_once() {
        let registry = CacheRegistry::new(MapProperties::new());

        let first = registry.instance("xslt", 50).unwrap();
        first.put(None, CacheKey::from("a"), Validity::Timestamp(1), payload(1u32));
        let second = registry.instance("xslt", 999).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.max_size(), 50);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_size_from_properties() {
        let registry =
            CacheRegistry::new(MapProperties::new().with("cache.xpath.size", "12"));

        assert_eq!(registry.instance("xpath", 50).unwrap().max_size(), 12);
        assert_eq!(registry.instance("other", 50).unwrap().max_size(), 50);
    }

    #[test]
    fn test_size_property_name() {
        assert_eq!(size_property("xslt"), "cache.xslt.size");

        // only the cache.<name>.size form is consulted
        let registry = CacheRegistry::new(MapProperties::new().with("oxf.xslt.size", "3"));
        assert_eq!(registry.instance("xslt", 50).unwrap().max_size(), 50);
    }

    #[test]
    fn test_resize_survives_lookup() {
        let registry =
            CacheRegistry::new(MapProperties::new().with("cache.xpath.size", "12"));

        registry.instance("xpath", 50).unwrap().set_max_size(3);

        assert_eq!(registry.instance("xpath", 50).unwrap().max_size(), 3);
    }

    #[test]
    fn test_invalid_property_propagates() {
        let registry =
            CacheRegistry::new(MapProperties::new().with("cache.broken.size", "lots"));

        assert!(matches!(
            registry.instance("broken", 10),
            Err(CacheError::InvalidProperty { .. })
        ));
        // nothing was registered
        assert!(registry.get("broken").is_none());
    }

    #[test]
    fn test_negative_size_rejected() {
        let registry =
            CacheRegistry::new(MapProperties::new().with("cache.negative.size", "-4"));

        assert_eq!(
            registry.instance("negative", 10).unwrap_err(),
            CacheError::InvalidSize {
                name: "negative".to_string(),
                size: -4,
            }
        );
    }

    #[test]
    fn test_zero_size_from_properties() {
        let registry =
            CacheRegistry::new(MapProperties::new().with("cache.disabled.size", "0"));

        let cache = registry.instance("disabled", 10).unwrap();
        cache.put(None, CacheKey::from("a"), Validity::Timestamp(1), payload(()));

        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_and_summaries() {
        let registry = CacheRegistry::with_main_size(MapProperties::new(), 5);

        assert!(registry.get("xslt").is_none());
        registry.instance("xslt", 7).unwrap();

        assert!(registry.get("xslt").is_some());
        let summaries = registry.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "main");
        assert_eq!(summaries[0].max_size, 5);
        assert_eq!(summaries[1].name, "xslt");
        assert_eq!(summaries[1].max_size, 7);
    }

    #[test]
    fn test_concurrent_first_use() {
        let registry = Arc::new(CacheRegistry::new(MapProperties::new()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || registry.instance("shared", 10).unwrap())
            })
            .collect();
        let caches: Vec<Arc<MemoryCache>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        for cache in &caches[1..] {
            assert!(Arc::ptr_eq(&caches[0], cache));
        }
        assert_eq!(registry.names(), vec!["main", "shared"]);
    }

    #[test]
    fn test_global_registry() {
        let main = instance();
        assert!(Arc::ptr_eq(&main, &global().main()));

        let named = named_instance("global-registry-test", 3).unwrap();
        assert!(Arc::ptr_eq(
            &named,
            &named_instance("global-registry-test", 99).unwrap()
        ));
        assert_eq!(named.max_size(), 3);
    }
}
