//! In-Memory Store Module
//!
//! Process-local backing store combining HashMap storage with TTL expiration
//! and keyspace counters.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{BackingStore, CacheEntry, KeyspaceStats};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct StoreState {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup counters
    stats: KeyspaceStats,
}

// == In-Memory Store ==
/// Backing store held in process memory.
///
/// Expired entries are dropped lazily on read and eagerly by
/// [`InMemoryStore::cleanup_expired`], which the background sweeper calls.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - state.entries.len();
        state.stats.record_expired(removed);
        removed
    }

    // == Stats ==
    /// Returns a copy of the current counters.
    pub async fn stats(&self) -> KeyspaceStats {
        self.state.read().await.stats.clone()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}

#[async_trait]
impl BackingStore for InMemoryStore {
    // Write lock: a read may remove an expired entry and always bumps a counter.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let expired = match state.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                state.stats.record_hit();
                return Ok(Some(value));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            state.entries.remove(key);
            state.stats.record_expired(1);
        }
        state.stats.record_miss();
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let entry = CacheEntry::new(key, value, ttl);
        self.state.write().await.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn info(&self) -> Result<HashMap<String, u64>, StoreError> {
        let state = self.state.read().await;
        Ok(state.stats.to_info(state.entries.len()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{EXPIRED_KEYS, KEYS, KEYSPACE_HITS, KEYSPACE_MISSES};

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_store_new() {
        let store = InMemoryStore::new();
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = InMemoryStore::new();

        store.set("key1", "value1".to_string(), TTL).await.unwrap();
        let value = store.get("key1").await.unwrap();

        assert_eq!(value.as_deref(), Some("value1"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = InMemoryStore::new();

        assert_eq!(store.get("nonexistent").await.unwrap(), None);
        assert_eq!(store.stats().await.keyspace_misses, 1);
    }

    #[tokio::test]
    async fn test_store_overwrite() {
        let store = InMemoryStore::new();

        store.set("key1", "value1".to_string(), TTL).await.unwrap();
        store.set("key1", "value2".to_string(), TTL).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap().as_deref(), Some("value2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_ttl_expiration() {
        let store = InMemoryStore::new();

        store
            .set("key1", "value1".to_string(), Duration::from_millis(50))
            .await
            .unwrap();
        assert!(store.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(store.get("key1").await.unwrap(), None);
        assert!(store.is_empty().await, "Expired entry should be dropped on read");

        let stats = store.stats().await;
        assert_eq!(stats.keyspace_hits, 1);
        assert_eq!(stats.keyspace_misses, 1);
        assert_eq!(stats.expired_keys, 1);
    }

    #[tokio::test]
    async fn test_store_cleanup_expired() {
        let store = InMemoryStore::new();

        store
            .set("key1", "value1".to_string(), Duration::from_millis(50))
            .await
            .unwrap();
        store
            .set("key2", "value2".to_string(), Duration::from_secs(10))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;

        let removed = store.cleanup_expired().await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("key2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_info() {
        let store = InMemoryStore::new();

        store.set("key1", "value1".to_string(), TTL).await.unwrap();
        store.get("key1").await.unwrap();
        store.get("missing").await.unwrap();
        store.get("missing").await.unwrap();

        let info = store.info().await.unwrap();
        assert_eq!(info[KEYSPACE_HITS], 1);
        assert_eq!(info[KEYSPACE_MISSES], 2);
        assert_eq!(info[EXPIRED_KEYS], 0);
        assert_eq!(info[KEYS], 1);
    }

    #[tokio::test]
    async fn test_set_does_not_touch_counters() {
        let store = InMemoryStore::new();

        store.set("key1", "value1".to_string(), TTL).await.unwrap();

        assert_eq!(store.stats().await, KeyspaceStats::new());
    }
}
