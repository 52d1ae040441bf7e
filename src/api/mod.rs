//! API Module
//!
//! HTTP handlers, middleware and routing for the property service.
//!
//! # Endpoints
//! - `GET /properties` - List all properties (read-through cached)
//! - `GET /cache-metrics` - Cache hit/miss metrics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{page_cache, PageCacheOptions};
pub use routes::create_router;
