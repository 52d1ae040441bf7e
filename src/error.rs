//! Error types for the property service
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failures raised by a backing cache store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store did not answer within the configured timeout
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    /// The store answered with something we could not interpret
    #[error("Protocol error: {0}")]
    Protocol(String),
}

// == Data Store Error Enum ==
/// Failures raised by the source of truth for property records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataStoreError {
    /// A query against the data store failed
    #[error("Query failed: {0}")]
    Query(String),

    /// The data store is not available
    #[error("Data store unavailable: {0}")]
    Unavailable(String),
}

// == App Error Enum ==
/// Error type surfaced to the HTTP layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Loading records from the data store failed
    #[error(transparent)]
    DataStore(#[from] DataStoreError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::DataStore(DataStoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DataStore(DataStoreError::Query(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_maps_to_503() {
        let err = AppError::from(DataStoreError::Unavailable("db down".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_query_failure_maps_to_500() {
        let err = AppError::from(DataStoreError::Query("syntax".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_data_store_error_message_is_transparent() {
        let err = AppError::from(DataStoreError::Unavailable("db down".to_string()));
        assert_eq!(err.to_string(), "Data store unavailable: db down");
    }

    #[test]
    fn test_timeout_display() {
        let err = StoreError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Store operation timed out after 250ms");
    }
}
