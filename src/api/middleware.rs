//! Page caching and method filtering
//!
//! Transport-level wrapper configured per route with the verbs it accepts and,
//! optionally, how long clients and proxies may cache a successful response.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;

/// Options for [`page_cache`].
#[derive(Debug, Clone)]
pub struct PageCacheOptions {
    /// `max-age` advertised on successful responses; `None` leaves caching headers alone
    pub ttl: Option<Duration>,
    /// Verbs the route accepts
    pub methods: Vec<Method>,
}

impl Default for PageCacheOptions {
    fn default() -> Self {
        Self {
            ttl: Some(Duration::from_secs(15 * 60)),
            methods: vec![Method::GET],
        }
    }
}

impl PageCacheOptions {
    /// Method filter only, no caching headers.
    pub fn methods_only(methods: Vec<Method>) -> Self {
        Self { ttl: None, methods }
    }

    /// Sets the advertised cache lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// HEAD is accepted wherever GET is.
    fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method) || (*method == Method::HEAD && self.methods.contains(&Method::GET))
    }

    fn allow_header(&self) -> String {
        self.methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn cache_control(&self) -> Option<HeaderValue> {
        let ttl = self.ttl?;
        HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs())).ok()
    }
}

/// Rejects verbs outside `options.methods` with 405 and stamps
/// `Cache-Control` on successful responses when a TTL is configured.
pub async fn page_cache(
    State(options): State<PageCacheOptions>,
    request: Request,
    next: Next,
) -> Response {
    if !options.allows(request.method()) {
        let message = format!("Method {} not allowed", request.method());
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, options.allow_header())],
            Json(ErrorResponse::new(message)),
        )
            .into_response();
    }

    let mut response = next.run(request).await;

    if response.status().is_success() {
        if let Some(value) = options.cache_control() {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
    }

    response
}
