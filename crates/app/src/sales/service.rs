//! Sales service.

use async_trait::async_trait;
use kopi::cart::SaleRequest;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError},
    sales::models::SaleRecord,
};

/// HTTP implementation of [`SalesService`].
#[derive(Debug, Clone)]
pub struct HttpSalesService {
    api: ApiClient,
}

impl HttpSalesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SalesService for HttpSalesService {
    async fn create_sale(&self, request: &SaleRequest) -> Result<SaleRecord, ApiError> {
        self.api.post("/sales", request).await
    }
}

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Submit a sale. Non-idempotent: the server computes the authoritative
    /// price and decrements stock, accepting or rejecting the whole sale.
    async fn create_sale(&self, request: &SaleRequest) -> Result<SaleRecord, ApiError>;
}
