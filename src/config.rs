//! Configuration Module
//!
//! Named integer properties used to size caches, and the admin server
//! configuration loaded from environment variables.

use std::collections::HashMap;
use std::env;

use crate::error::{CacheError, Result};

// == Property Source ==
/// Source of named integer settings, consulted when a cache is created.
pub trait PropertySource {
    /// Returns the integer value of `name`, or `default` if it is not set.
    ///
    /// A value that is set but does not parse is an error.
    fn get_int(&self, name: &str, default: i64) -> Result<i64>;
}

fn parse_int(name: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| CacheError::InvalidProperty {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

// == Environment Properties ==
/// Reads properties from environment variables.
///
/// The variable name is the property name upper-cased with every
/// non-alphanumeric character replaced by `_`, so `cache.xslt.size` is read
/// from `CACHE_XSLT_SIZE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProperties;

impl EnvProperties {
    pub fn variable_name(property: &str) -> String {
        property
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl PropertySource for EnvProperties {
    fn get_int(&self, name: &str, default: i64) -> Result<i64> {
        match env::var(Self::variable_name(name)) {
            Ok(raw) => parse_int(name, &raw),
            Err(env::VarError::NotPresent) => Ok(default),
            Err(env::VarError::NotUnicode(raw)) => Err(CacheError::InvalidProperty {
                name: name.to_string(),
                value: raw.to_string_lossy().into_owned(),
            }),
        }
    }
}

// == Map Properties ==
/// In-memory properties, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MapProperties {
    values: HashMap<String, String>,
}

impl MapProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl PropertySource for MapProperties {
    fn get_int(&self, name: &str, default: i64) -> Result<i64> {
        match self.values.get(name) {
            Some(raw) => parse_int(name, raw),
            None => Ok(default),
        }
    }
}

/// Admin server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Size of preloaded caches that have no size property
    pub default_cache_size: usize,
    /// Names of caches created at startup
    pub preload_caches: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_CACHE_SIZE` - Size for preloaded caches (default: 200)
    /// - `PRELOAD_CACHES` - Comma-separated cache names (default: none)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            default_cache_size: env::var("DEFAULT_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            preload_caches: env::var("PRELOAD_CACHES")
                .map(|v| parse_names(&v))
                .unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_cache_size: 200,
            preload_caches: Vec::new(),
        }
    }
}

fn parse_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.default_cache_size, 200);
        assert!(config.preload_caches.is_empty());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_names("xslt, xpath,,  "), vec!["xslt", "xpath"]);
        assert!(parse_names("").is_empty());
    }

    #[test]
    fn test_variable_name() {
        assert_eq!(EnvProperties::variable_name("cache.xslt.size"), "CACHE_XSLT_SIZE");
        assert_eq!(
            EnvProperties::variable_name("cache.xforms-static.size"),
            "CACHE_XFORMS_STATIC_SIZE"
        );
    }

    #[test]
    fn test_env_properties() {
        env::set_var("CACHE_ENV_PROPERTIES_TEST_SIZE", " 42 ");
        env::set_var("CACHE_ENV_PROPERTIES_BAD_SIZE", "many");

        let properties = EnvProperties;
        assert_eq!(properties.get_int("cache.env-properties-test.size", 7), Ok(42));
        assert_eq!(properties.get_int("cache.env-properties-unset.size", 7), Ok(7));
        assert!(matches!(
            properties.get_int("cache.env-properties-bad.size", 7),
            Err(CacheError::InvalidProperty { .. })
        ));

        env::remove_var("CACHE_ENV_PROPERTIES_TEST_SIZE");
        env::remove_var("CACHE_ENV_PROPERTIES_BAD_SIZE");
    }

    #[test]
    fn test_map_properties() {
        let properties = MapProperties::new()
            .with("cache.xslt.size", "10")
            .with("cache.broken.size", "1O");

        assert_eq!(properties.get_int("cache.xslt.size", 0), Ok(10));
        assert_eq!(properties.get_int("cache.other.size", 5), Ok(5));
        assert_eq!(
            properties.get_int("cache.broken.size", 5),
            Err(CacheError::InvalidProperty {
                name: "cache.broken.size".to_string(),
                value: "1O".to_string(),
            })
        );
    }
}
