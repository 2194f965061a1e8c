//! Products service.

use async_trait::async_trait;
use kopi::products::ProductId;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError},
    products::models::{NewProduct, ProductPatch, ProductRecord},
};

/// HTTP implementation of [`ProductsService`].
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    api: ApiClient,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ApiError> {
        self.api.get("/products").await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<ProductRecord, ApiError> {
        self.api.post("/products", product).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<ProductRecord, ApiError> {
        self.api.patch(&format!("/products/{id}"), patch).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.api.delete(&format!("/products/{id}")).await
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve the full catalog.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ApiError>;

    /// Create a new catalog product.
    async fn create_product(&self, product: &NewProduct) -> Result<ProductRecord, ApiError>;

    /// Apply a partial update to a product.
    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<ProductRecord, ApiError>;

    /// Delete a product.
    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError>;
}
