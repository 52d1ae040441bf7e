//! Property Cache - property listing service with a read-through cache
//!
//! Serves property records through a TTL read-through cache and reports the
//! backing store's hit/miss counters as a metrics snapshot.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod properties;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::PropertyService;
pub use tasks::spawn_cleanup_task;
