//! Property data store
//!
//! The source of truth the read-through cache loads from on miss.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::error::DataStoreError;
use crate::properties::Property;

/// Source of truth for property records.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Returns every property, in table order.
    async fn list_all(&self) -> Result<Vec<Property>, DataStoreError>;
}

// == In-Memory Repository ==
/// Property table held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPropertyRepository {
    properties: Vec<Property>,
}

impl InMemoryPropertyRepository {
    /// Creates a repository holding the given rows.
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    /// Loads rows from a JSON array of properties.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataStoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DataStoreError::Unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let properties: Vec<Property> = serde_json::from_str(&raw).map_err(|e| {
            DataStoreError::Unavailable(format!("invalid property data in {}: {}", path.display(), e))
        })?;

        info!("Loaded {} properties from {}", properties.len(), path.display());
        Ok(Self::new(properties))
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn list_all(&self) -> Result<Vec<Property>, DataStoreError> {
        Ok(self.properties.clone())
    }
}
