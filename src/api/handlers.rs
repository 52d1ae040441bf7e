//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::api::PageCacheOptions;
use crate::cache::MetricsSnapshot;
use crate::error::Result;
use crate::models::{HealthResponse, PropertyListResponse};
use crate::service::PropertyService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached property operations
    pub service: Arc<PropertyService>,
    /// Page caching and method filtering for GET /properties
    pub page_cache: PageCacheOptions,
}

impl AppState {
    /// Creates a new AppState with default page caching.
    pub fn new(service: PropertyService) -> Self {
        Self {
            service: Arc::new(service),
            page_cache: PageCacheOptions::default(),
        }
    }

    /// Replaces the page caching options.
    pub fn with_page_cache(mut self, page_cache: PageCacheOptions) -> Self {
        self.page_cache = page_cache;
        self
    }
}

/// Handler for GET /properties
///
/// Returns every property, served through the read-through cache.
pub async fn property_list_handler(
    State(state): State<AppState>,
) -> Result<Json<PropertyListResponse>> {
    let properties = state.service.get_property_list().await?;

    Ok(Json(PropertyListResponse::new(&properties)))
}

/// Handler for GET /cache-metrics
///
/// Always 200: an unreachable counter source shows up in the `error` field.
pub async fn cache_metrics_handler(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.service.get_cache_metrics().await)
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
