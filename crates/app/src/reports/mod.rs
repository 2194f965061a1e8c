//! Sales reporting.

mod models;
mod service;

pub use models::{PeriodReport, PeriodSale, TopProduct, TopProductsReport};
pub use service::{HttpReportsService, MockReportsService, ReportsService};
