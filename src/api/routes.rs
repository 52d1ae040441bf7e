//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{http::Method, middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{cache_metrics_handler, health_handler, property_list_handler, AppState};
use super::middleware::{page_cache, PageCacheOptions};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties` - Cached property list, page-cached per `AppState::page_cache`
/// - `GET /cache-metrics` - Cache hit/miss snapshot
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Page cache / method filter on `/properties` and `/cache-metrics`
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let properties = Router::new()
        .route("/properties", get(property_list_handler))
        .route_layer(middleware::from_fn_with_state(
            state.page_cache.clone(),
            page_cache,
        ));

    let metrics = Router::new()
        .route("/cache-metrics", get(cache_metrics_handler))
        .route_layer(middleware::from_fn_with_state(
            PageCacheOptions::methods_only(vec![Method::GET]),
            page_cache,
        ));

    Router::new()
        .merge(properties)
        .merge(metrics)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{InMemoryStore, MetricsAggregator, ReadThroughCache};
    use crate::properties::InMemoryPropertyRepository;
    use crate::service::PropertyService;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(InMemoryStore::new());
        let service = PropertyService::new(
            Arc::new(InMemoryPropertyRepository::default()),
            ReadThroughCache::new(store.clone(), Duration::from_secs(3600)),
            MetricsAggregator::new(store),
        );
        create_router(AppState::new(service))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_properties_endpoint_sets_cache_control() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/properties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=900"
        );
    }

    #[tokio::test]
    async fn test_metrics_endpoint_has_no_cache_control() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache-metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn test_properties_rejects_post() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/properties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
