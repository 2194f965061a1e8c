//! Sale submission.

mod models;
mod service;

pub use models::{SaleItemRecord, SaleRecord};
pub use service::{HttpSalesService, MockSalesService, SalesService};
