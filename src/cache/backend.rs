//! Backing store trait
//!
//! The seam between the read-through cache and whatever actually holds the
//! bytes. Stores own expiry: callers only pass a TTL on write.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

/// Key/value store with native TTL support and lookup counters.
///
/// Values are opaque strings; typed encoding happens in the caller.
/// Implementations must be safe to share across tasks.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous entry, expiring after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;

    /// Returns the store's raw counters (`keyspace_hits`, `keyspace_misses`, ...).
    ///
    /// Counters the store does not track are simply absent from the map.
    async fn info(&self) -> Result<HashMap<String, u64>, StoreError>;
}
