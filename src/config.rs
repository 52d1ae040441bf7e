//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which backing store holds cached entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Process-local store with a background expiry sweeper
    Memory,
    /// Shared Redis server
    Redis,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for the cached property list
    pub cache_ttl: u64,
    /// `max-age` in seconds advertised on the property list response
    pub page_cache_ttl: u64,
    /// Backing store selection
    pub cache_backend: CacheBackend,
    /// Redis connection URL, used when `cache_backend` is Redis
    pub redis_url: String,
    /// Timeout in milliseconds for each backing store command
    pub store_timeout_ms: u64,
    /// Background cleanup task interval in seconds (memory backend only)
    pub cleanup_interval: u64,
    /// Optional JSON file used to seed the property table
    pub properties_file: Option<PathBuf>,
    /// Serialize concurrent misses on the same cache key
    pub coalesce_loads: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Property list TTL in seconds (default: 3600)
    /// - `PAGE_CACHE_TTL` - Page cache max-age in seconds (default: 900)
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    /// - `STORE_TIMEOUT_MS` - Backing store command timeout (default: 5000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `PROPERTIES_FILE` - JSON seed file for properties (default: unset)
    /// - `COALESCE_LOADS` - `true` to coalesce concurrent misses (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            page_cache_ttl: parse_var("PAGE_CACHE_TTL").unwrap_or(defaults.page_cache_ttl),
            cache_backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            store_timeout_ms: parse_var("STORE_TIMEOUT_MS").unwrap_or(defaults.store_timeout_ms),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            properties_file: env::var("PROPERTIES_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            coalesce_loads: parse_var("COALESCE_LOADS").unwrap_or(defaults.coalesce_loads),
        }
    }

    /// Property list TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Page cache max-age as a Duration.
    pub fn page_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.page_cache_ttl)
    }

    /// Backing store command timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: 3600,
            page_cache_ttl: 900,
            cache_backend: CacheBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            store_timeout_ms: 5000,
            cleanup_interval: 1,
            properties_file: None,
            coalesce_loads: false,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
