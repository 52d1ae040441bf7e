//! Cache Metrics Module
//!
//! Turns a backing store's raw lookup counters into a reportable snapshot.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::cache::{BackingStore, KEYSPACE_HITS, KEYSPACE_MISSES};

// == Metrics Snapshot ==
/// Point-in-time view of cache effectiveness.
///
/// `total_requests` is always `keyspace_hits + keyspace_misses`. When the
/// counters could not be read every number is zero and `error` says why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    pub total_requests: u64,
    /// Percentage of lookups that hit, rounded to 2 decimal places
    pub hit_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MetricsSnapshot {
    /// Builds a snapshot from raw counters.
    pub fn from_counters(keyspace_hits: u64, keyspace_misses: u64) -> Self {
        Self {
            keyspace_hits,
            keyspace_misses,
            total_requests: keyspace_hits.saturating_add(keyspace_misses),
            hit_ratio: hit_ratio(keyspace_hits, keyspace_misses),
            error: None,
        }
    }

    /// Zeroed snapshot carrying the reason the counters were unavailable.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::from_counters(0, 0)
        }
    }
}

// == Hit Ratio ==
/// Hit percentage in `[0, 100]`, rounded half away from zero to 2 decimals.
///
/// Returns `0.0` when there were no lookups.
pub fn hit_ratio(hits: u64, misses: u64) -> f64 {
    let (hits, total) = (u128::from(hits), u128::from(hits) + u128::from(misses));
    if total == 0 {
        return 0.0;
    }
    // Hundredths of a percent, rounded in integers so exact halves always round up
    let hundredths = (hits * 20_000 + total) / (2 * total);
    hundredths as f64 / 100.0
}

// == Metrics Aggregator ==
/// Reads counters from a backing store on demand.
///
/// Holds no state between calls and never returns an error: an unreachable
/// store yields [`MetricsSnapshot::unavailable`].
pub struct MetricsAggregator {
    store: Arc<dyn BackingStore>,
}

impl MetricsAggregator {
    /// Creates an aggregator over the given store.
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        Self { store }
    }

    /// Queries the store and computes a fresh snapshot.
    pub async fn snapshot(&self) -> MetricsSnapshot {
        match self.store.info().await {
            Ok(info) => {
                let hits = info.get(KEYSPACE_HITS).copied().unwrap_or(0);
                let misses = info.get(KEYSPACE_MISSES).copied().unwrap_or(0);
                let snapshot = MetricsSnapshot::from_counters(hits, misses);
                info!(metrics = ?snapshot, "Cache metrics");
                snapshot
            }
            Err(e) => {
                error!(error = %e, "Error retrieving cache metrics");
                MetricsSnapshot::unavailable(e.to_string())
            }
        }
    }
}
