//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product identifier issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a product id from its raw backend value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw backend value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Immutable view of a catalog product, captured at catalog-fetch time.
///
/// The snapshot is copied into cart lines when an item is added. Later
/// catalog refreshes never mutate a line that already holds a snapshot: the
/// recorded price and stock ceiling stay as they were at add time, and the
/// server re-validates both at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Backend identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price as known at snapshot time.
    pub price: Decimal,

    /// Stock ceiling as known at snapshot time.
    pub stock: u32,
}

impl ProductSnapshot {
    /// Create a snapshot from its parts.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn product_id_displays_raw_value() {
        assert_eq!(ProductId::new(42).to_string(), "42");
    }

    #[test]
    fn snapshot_holds_captured_values() {
        let snapshot = ProductSnapshot::new(ProductId::new(1), "Latte", Decimal::new(350, 2), 12);

        assert_eq!(snapshot.id, ProductId::new(1));
        assert_eq!(snapshot.name, "Latte");
        assert_eq!(snapshot.price, Decimal::new(350, 2));
        assert_eq!(snapshot.stock, 12);
    }
}
