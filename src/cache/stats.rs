//! Keyspace Statistics Module
//!
//! Raw counters kept by a backing store, mirroring the fields Redis reports
//! under `INFO stats`.

use std::collections::HashMap;

use serde::Serialize;

/// Counter name for successful key lookups.
pub const KEYSPACE_HITS: &str = "keyspace_hits";
/// Counter name for failed key lookups.
pub const KEYSPACE_MISSES: &str = "keyspace_misses";
/// Counter name for keys removed because their TTL elapsed.
pub const EXPIRED_KEYS: &str = "expired_keys";
/// Current number of keys held by the store.
pub const KEYS: &str = "keys";

// == Keyspace Stats ==
/// Tracks lookup outcomes for a backing store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyspaceStats {
    /// Lookups that found a live key
    pub keyspace_hits: u64,
    /// Lookups that found nothing or an expired key
    pub keyspace_misses: u64,
    /// Keys removed after their TTL elapsed
    pub expired_keys: u64,
}

impl KeyspaceStats {
    // == Constructor ==
    /// Creates a new KeyspaceStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.keyspace_hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.keyspace_misses += 1;
    }

    // == Record Expired ==
    /// Adds `count` keys to the expired counter.
    pub fn record_expired(&mut self, count: usize) {
        self.expired_keys += count as u64;
    }

    // == Info ==
    /// Renders the counters as a raw info map, the shape every backing store
    /// reports through `BackingStore::info`.
    pub fn to_info(&self, keys: usize) -> HashMap<String, u64> {
        HashMap::from([
            (KEYSPACE_HITS.to_string(), self.keyspace_hits),
            (KEYSPACE_MISSES.to_string(), self.keyspace_misses),
            (EXPIRED_KEYS.to_string(), self.expired_keys),
            (KEYS.to_string(), keys as u64),
        ])
    }
}
