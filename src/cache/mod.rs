//! Cache Module
//!
//! Read-through caching over a pluggable backing store, plus hit/miss metrics.

mod backend;
mod entry;
mod metrics;
mod read_through;
mod redis_store;
mod stats;
mod store;


// Re-export public types
pub use backend::BackingStore;
pub use entry::CacheEntry;
pub use metrics::{hit_ratio, MetricsAggregator, MetricsSnapshot};
pub use read_through::ReadThroughCache;
pub use redis_store::{RedisStore, RedisStoreConfig};
pub use stats::{KeyspaceStats, EXPIRED_KEYS, KEYS, KEYSPACE_HITS, KEYSPACE_MISSES};
pub use store::InMemoryStore;
