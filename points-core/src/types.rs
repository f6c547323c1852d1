//! Receipt data model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::scoring::compute_points;

/// Opaque receipt identifier, assigned at ingestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReceiptId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ReceiptId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A purchased line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    /// Decimal string, e.g. "12.25"
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

/// A purchase receipt as submitted by a client
///
/// Numeric, date and time fields are kept as the strings the client sent.
/// Scoring parses them leniently, so a malformed value never rejects the
/// receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    /// "YYYY-MM-DD"
    pub purchase_date: String,
    /// "HH:MM", 24-hour
    pub purchase_time: String,
    /// Decimal string, e.g. "35.35"
    pub total: String,
    pub items: Vec<Item>,
}

impl Receipt {
    /// Parse a receipt from its JSON wire form
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A receipt after ingestion: identifier and points assigned
///
/// Serializes as the receipt's own fields plus `id` and `points`. This is the
/// record written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredReceipt {
    pub id: ReceiptId,
    #[serde(default)]
    pub points: u64,
    #[serde(flatten)]
    pub receipt: Receipt,
}

impl ScoredReceipt {
    /// Assign a fresh identifier and compute points
    pub fn new(receipt: Receipt) -> Self {
        Self::with_id(ReceiptId::generate(), receipt)
    }

    pub fn with_id(id: ReceiptId, receipt: Receipt) -> Self {
        let points = compute_points(&receipt);
        Self {
            id,
            points,
            receipt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_receipt() -> Receipt {
        Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            total: "35.35".to_string(),
            items: vec![Item::new("Emils Cheese Pizza", "12.25")],
        }
    }

    #[test]
    fn test_receipt_wire_field_names() {
        let json = r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "total": "35.35",
            "items": [{"shortDescription": "Emils Cheese Pizza", "price": "12.25"}]
        }"#;

        let receipt = Receipt::from_json(json).unwrap();
        assert_eq!(receipt, sample_receipt());
    }

    #[test]
    fn test_receipt_missing_field_rejected() {
        let json = r#"{"retailer": "Target", "total": "1.00", "items": []}"#;
        assert!(Receipt::from_json(json).is_err());
    }

    #[test]
    fn test_scored_receipt_record_shape() {
        let scored = ScoredReceipt::with_id(ReceiptId::from("abc"), sample_receipt());
        let value = serde_json::to_value(&scored).unwrap();

        assert_eq!(value["id"], "abc");
        assert_eq!(value["points"], scored.points);
        assert_eq!(value["retailer"], "Target");
        assert_eq!(value["purchaseDate"], "2022-01-01");
        assert_eq!(value["items"][0]["shortDescription"], "Emils Cheese Pizza");
    }

    #[test]
    fn test_scored_receipt_without_points_defaults_to_zero() {
        let json = r#"{
            "id": "abc",
            "retailer": "",
            "purchaseDate": "",
            "purchaseTime": "",
            "total": "",
            "items": []
        }"#;

        let scored: ScoredReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(scored.points, 0);
        assert_eq!(scored.id.as_str(), "abc");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ReceiptId::generate();
        let b = ReceiptId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }
}
