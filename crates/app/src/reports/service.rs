//! Reports service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError},
    reports::models::{PeriodReport, TopProductsReport},
};

/// HTTP implementation of [`ReportsService`].
#[derive(Debug, Clone)]
pub struct HttpReportsService {
    api: ApiClient,
}

impl HttpReportsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReportsService for HttpReportsService {
    async fn period_report(&self, start: Date, end: Date) -> Result<PeriodReport, ApiError> {
        self.api
            .get_with_query(
                "/reports/period",
                &[
                    ("startDate", start.to_string()),
                    ("endDate", end.to_string()),
                ],
            )
            .await
    }

    async fn top_products(&self) -> Result<TopProductsReport, ApiError> {
        self.api.get("/reports/top-3").await
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Sales aggregated over an inclusive date range.
    async fn period_report(&self, start: Date, end: Date) -> Result<PeriodReport, ApiError>;

    /// The three best-selling products.
    async fn top_products(&self) -> Result<TopProductsReport, ApiError>;
}
