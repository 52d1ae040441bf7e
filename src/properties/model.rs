//! Property record

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// == Property ==
/// A listed property as stored in the data store.
///
/// Records are immutable once loaded; the cache only stores serialized copies.
/// `price` serializes as a decimal string so no precision is lost in transit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Property {
        Property {
            id: 7,
            title: "Loft".to_string(),
            description: "Open plan".to_string(),
            price: Decimal::new(12_345_010, 2),
            location: "Braga".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_price_serializes_as_exact_string() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["price"], "123450.10");
    }

    #[test]
    fn test_price_survives_serialization() {
        let property = sample();
        let raw = serde_json::to_string(&property).unwrap();
        let decoded: Property = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, property);
        assert_eq!(decoded.price.scale(), 2);
    }
}
