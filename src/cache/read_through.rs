//! Read-Through Cache Module
//!
//! Serves a collection from the backing store while it is live and falls back
//! to a loader on miss, storing what the loader returns.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::cache::BackingStore;
use crate::error::DataStoreError;

// == Read-Through Cache ==
/// Read-through cache over a [`BackingStore`] with a TTL fixed at construction.
///
/// Failure policy:
/// - loader errors propagate unchanged and nothing is cached
/// - a failing or undecodable store read counts as a miss
/// - a failing store write is logged and the loaded records are still returned
///
/// By default concurrent misses on the same key each run the loader. Enable
/// [`ReadThroughCache::with_load_coalescing`] to serialize them per key.
pub struct ReadThroughCache {
    store: Arc<dyn BackingStore>,
    ttl: Duration,
    load_locks: Option<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl ReadThroughCache {
    // == Constructor ==
    /// Creates a cache that writes entries with the given TTL.
    pub fn new(store: Arc<dyn BackingStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            load_locks: None,
        }
    }

    /// Serializes loads per key: while one caller runs the loader, other
    /// callers missing on the same key wait and then re-check the store.
    pub fn with_load_coalescing(mut self) -> Self {
        self.load_locks = Some(Mutex::new(HashMap::new()));
        self
    }

    // == Get Or Load ==
    /// Returns the records cached under `key`, loading and caching them on miss.
    pub async fn get_or_load<T, F, Fut>(&self, key: &str, loader: F) -> Result<Vec<T>, DataStoreError>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Vec<T>, DataStoreError>> + Send,
    {
        if let Some(records) = self.lookup::<T>(key).await {
            info!(key, count = records.len(), "Cache hit: retrieved {} records from cache", records.len());
            return Ok(records);
        }

        let Some(lock) = self.load_lock(key).await else {
            return self.load(key, loader).await;
        };

        let _guard = lock.lock().await;
        // Another caller may have filled the key while we waited.
        if let Some(records) = self.lookup::<T>(key).await {
            info!(key, count = records.len(), "Cache hit after concurrent load: retrieved {} records", records.len());
            return Ok(records);
        }
        self.load(key, loader).await
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!(key, error = %e, "Cached value could not be decoded, treating as miss");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn load<T, F, Fut>(&self, key: &str, loader: F) -> Result<Vec<T>, DataStoreError>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, DataStoreError>>,
    {
        info!(key, "Cache miss: fetching records from data store");

        let records = loader().await.map_err(|e| {
            error!(key, error = %e, "Loading records failed, cache left unpopulated");
            e
        })?;

        self.populate(key, &records).await;
        Ok(records)
    }

    async fn populate<T: Serialize>(&self, key: &str, records: &[T]) {
        let raw = match serde_json::to_string(records) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Records could not be encoded, not caching");
                return;
            }
        };

        match self.store.set(key, raw, self.ttl).await {
            Ok(()) => info!(
                key,
                count = records.len(),
                ttl_secs = self.ttl.as_secs(),
                "Cached {} records",
                records.len()
            ),
            Err(e) => warn!(key, error = %e, "Cache write failed, returning uncached records"),
        }
    }

    async fn load_lock(&self, key: &str) -> Option<Arc<Mutex<()>>> {
        let locks = self.load_locks.as_ref()?;
        let mut locks = locks.lock().await;
        Some(Arc::clone(locks.entry(key.to_string()).or_default()))
    }
}
