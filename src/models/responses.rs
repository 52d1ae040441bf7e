//! Response DTOs for the property API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::properties::Property;

/// One property as rendered on the wire.
///
/// `price` is the exact decimal string and `created_at` is RFC 3339.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDto {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub created_at: String,
}

impl From<&Property> for PropertyDto {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id,
            title: property.title.clone(),
            description: property.description.clone(),
            price: property.price.to_string(),
            location: property.location.clone(),
            created_at: property.created_at.to_rfc3339(),
        }
    }
}

/// Response body for GET /properties
#[derive(Debug, Clone, Serialize)]
pub struct PropertyListResponse {
    pub properties: Vec<PropertyDto>,
    pub count: usize,
}

impl PropertyListResponse {
    /// Renders a list of properties, keeping their order.
    pub fn new(properties: &[Property]) -> Self {
        let properties: Vec<PropertyDto> = properties.iter().map(PropertyDto::from).collect();
        Self {
            count: properties.len(),
            properties,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn property(id: u64) -> Property {
        Property {
            id,
            title: "Loft".to_string(),
            description: "Open plan".to_string(),
            price: Decimal::new(9_999_950, 2),
            location: "Coimbra".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_property_dto_formats_price_and_timestamp() {
        let dto = PropertyDto::from(&property(1));
        assert_eq!(dto.price, "99999.50");
        assert_eq!(dto.created_at, "2025-06-01T12:00:00+00:00");
    }

    #[test]
    fn test_property_list_response_counts() {
        let resp = PropertyListResponse::new(&[property(2), property(1)]);
        assert_eq!(resp.count, 2);
        assert_eq!(resp.properties[0].id, 2);
        assert_eq!(resp.properties[1].id, 1);
    }

    #[test]
    fn test_empty_property_list() {
        let json = serde_json::to_value(PropertyListResponse::new(&[])).unwrap();
        assert_eq!(json["count"], 0);
        assert_eq!(json["properties"], serde_json::json!([]));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
