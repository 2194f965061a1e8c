//! Sale wire models.
//!
//! The request side lives in the domain core ([`kopi::cart::SaleRequest`]);
//! these are the records the server answers with, price-at-sale included.

use jiff::Timestamp;
use kopi::{payment::PaymentMethod, products::ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: i64,

    /// Server-computed total.
    pub total: Decimal,
    pub payment_method: PaymentMethod,

    /// Operator who recorded the sale.
    pub user_id: i64,
    pub items: Vec<SaleItemRecord>,
    pub created_at: Timestamp,
}

/// One line of a recorded sale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRecord {
    pub id: i64,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price the server charged, authoritative over any client snapshot.
    pub price_at_sale: Decimal,
}
