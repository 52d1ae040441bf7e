//! Property Service
//!
//! The two operations the HTTP layer calls: the cached property list and the
//! cache metrics snapshot.

use std::sync::Arc;

use crate::cache::{MetricsAggregator, MetricsSnapshot, ReadThroughCache};
use crate::error::DataStoreError;
use crate::properties::{Property, PropertyRepository};

/// Cache key holding the full property list.
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

/// Composes the read-through cache and the metrics aggregator over one
/// repository. All collaborators are injected by the caller.
pub struct PropertyService {
    repository: Arc<dyn PropertyRepository>,
    cache: ReadThroughCache,
    metrics: MetricsAggregator,
}

impl PropertyService {
    pub fn new(
        repository: Arc<dyn PropertyRepository>,
        cache: ReadThroughCache,
        metrics: MetricsAggregator,
    ) -> Self {
        Self {
            repository,
            cache,
            metrics,
        }
    }

    /// Returns all properties, served from cache while the entry is live.
    pub async fn get_property_list(&self) -> Result<Vec<Property>, DataStoreError> {
        let repository = Arc::clone(&self.repository);
        self.cache
            .get_or_load(ALL_PROPERTIES_KEY, || async move { repository.list_all().await })
            .await
    }

    /// Returns a fresh metrics snapshot. Never fails.
    pub async fn get_cache_metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot().await
    }
}
