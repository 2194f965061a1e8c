//! Product wire models.

use jiff::Timestamp;
use kopi::products::{ProductId, ProductSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product as the backend returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Capture the snapshot the cart works with.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot::new(self.id, self.name.clone(), self.price, self.stock)
    }
}

/// Creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Partial-update payload. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn record_snapshot_captures_price_and_stock() -> TestResult {
        let record: ProductRecord = serde_json::from_str(
            r#"{
                "id": 5,
                "name": "Americano",
                "price": 2.5,
                "stock": 9,
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-01-02T00:00:00Z"
            }"#,
        )?;

        let snapshot = record.snapshot();

        assert_eq!(snapshot.id, ProductId::new(5));
        assert_eq!(snapshot.price, Decimal::new(25, 1));
        assert_eq!(snapshot.stock, 9);

        Ok(())
    }

    #[test]
    fn patch_omits_absent_fields() -> TestResult {
        let patch = ProductPatch {
            price: Some(Decimal::new(300, 2)),
            ..ProductPatch::default()
        };

        assert_eq!(serde_json::to_string(&patch)?, r#"{"price":3.0}"#);

        Ok(())
    }
}
