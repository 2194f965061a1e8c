//! Report wire models.

use jiff::{Timestamp, civil::Date};
use kopi::{payment::PaymentMethod, products::ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Aggregated sales over a date range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub sales: Vec<PeriodSale>,

    /// Number of sales in the period.
    pub total_sales: u64,

    /// Revenue over the period.
    pub total_revenue: Decimal,
    pub start_date: Date,
    pub end_date: Date,
}

/// One sale row of a period report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSale {
    pub id: i64,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub created_at: Timestamp,
}

/// Best sellers by quantity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopProductsReport {
    pub products: Vec<TopProduct>,
}

/// One row of the top-products report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub id: ProductId,
    pub name: String,
    pub total_quantity: u64,
    pub total_revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn period_report_deserializes_from_wire_format() -> TestResult {
        let report: PeriodReport = serde_json::from_str(
            r#"{
                "sales": [
                    { "id": 1, "total": 4.5, "paymentMethod": "CASH", "createdAt": "2026-02-01T09:00:00Z" }
                ],
                "totalSales": 1,
                "totalRevenue": 4.5,
                "startDate": "2026-02-01",
                "endDate": "2026-02-28"
            }"#,
        )?;

        assert_eq!(report.total_sales, 1);
        assert_eq!(report.start_date, Date::constant(2026, 2, 1));

        Ok(())
    }
}
