//! Redis backing store
//!
//! Entries are written with `SETEX`, so expiry is handled by the server.
//! Counters come from `INFO stats`.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, InfoDict, RedisError};

use crate::cache::{BackingStore, EXPIRED_KEYS, KEYSPACE_HITS, KEYSPACE_MISSES};
use crate::error::StoreError;

/// Configuration for the Redis store
#[derive(Debug, Clone)]
pub struct RedisStoreConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Upper bound for connecting and for every command
    pub timeout: Duration,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl RedisStoreConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the command timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Backing store on a shared Redis server.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    config: RedisStoreConfig,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisStore {
    /// Opens a managed connection to the configured server.
    pub async fn connect(config: RedisStoreConfig) -> Result<Self, StoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| StoreError::Connection(format!("Invalid Redis URL: {}", e)))?;

        let connection = bounded(config.timeout, ConnectionManager::new(client)).await?;

        Ok(Self { connection, config })
    }
}

#[async_trait]
impl BackingStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection.clone();
        bounded(self.config.timeout, conn.get(key)).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        // SETEX rejects a zero expiry
        let ttl_secs = ttl.as_secs().max(1);

        bounded::<()>(self.config.timeout, conn.set_ex(key, value, ttl_secs)).await
    }

    async fn info(&self) -> Result<HashMap<String, u64>, StoreError> {
        let mut conn = self.connection.clone();
        let info: InfoDict = bounded(
            self.config.timeout,
            redis::cmd("INFO").arg("stats").query_async(&mut conn),
        )
        .await?;

        Ok(counters_from_info(&info))
    }
}

/// Picks the counters we report out of an `INFO` reply; absent fields stay absent.
fn counters_from_info(info: &InfoDict) -> HashMap<String, u64> {
    [KEYSPACE_HITS, KEYSPACE_MISSES, EXPIRED_KEYS]
        .into_iter()
        .filter_map(|name| info.get::<u64>(name).map(|v| (name.to_string(), v)))
        .collect()
}

async fn bounded<T>(
    timeout: Duration,
    fut: impl Future<Output = Result<T, RedisError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(Err(err)) if err.is_timeout() => Err(StoreError::Timeout(timeout)),
        Ok(result) => result.map_err(store_error),
        Err(_) => Err(StoreError::Timeout(timeout)),
    }
}

fn store_error(err: RedisError) -> StoreError {
    if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Protocol(err.to_string())
    }
}
