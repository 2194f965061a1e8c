//! POS Register
//!
//! The register controller owns the catalog read state, the cart, and the
//! checkout protocol. It is an explicitly constructed state container: the
//! services it calls are injected, and every piece of view-facing state is a
//! plain value a renderer can read off.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use kopi::{
    cart::{Cart, CartError},
    payment::PaymentMethod,
    products::{ProductId, ProductSnapshot},
};
use thiserror::Error;

use crate::{
    api::ApiError,
    fetch::FetchState,
    products::ProductsService,
    sales::{SaleRecord, SalesService},
};

/// How long a transient notice stays up before auto-dismissing.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message with an auto-dismiss deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    expires_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: String) -> Self {
        Self {
            kind,
            message,
            expires_at: Instant::now() + NOTICE_TTL,
        }
    }

    /// Whether the notice should no longer be shown at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Errors surfaced by checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines; nothing was sent to the server.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The server rejected the sale as a whole. The cart is left untouched
    /// and the submission can be retried as-is.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The register's state container.
pub struct Register {
    products: Arc<dyn ProductsService>,
    sales: Arc<dyn SalesService>,
    catalog: FetchState<Vec<ProductSnapshot>>,
    cart: Cart,
    notice: Option<Notice>,
}

impl Register {
    /// Create a register with an idle catalog and an empty cart.
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, sales: Arc<dyn SalesService>) -> Self {
        Self {
            products,
            sales,
            catalog: FetchState::Idle,
            cart: Cart::new(),
            notice: None,
        }
    }

    /// Fetch the catalog, replacing whatever the previous read held.
    ///
    /// A failure degrades softly: the explicit `Failed` state is kept for
    /// rendering, [`Register::catalog`] reads as empty, and the cause goes
    /// to the log rather than a prominent error surface.
    pub async fn load_catalog(&mut self) {
        self.catalog = FetchState::Loading;

        self.catalog = match self.products.list_products().await {
            Ok(records) => FetchState::Ready(
                records.iter().map(|record| record.snapshot()).collect(),
            ),
            Err(error) => {
                tracing::warn!(%error, "failed to load product catalog");
                FetchState::Failed(error.to_string())
            }
        };
    }

    /// Products of the last successful catalog read, empty otherwise.
    #[must_use]
    pub fn catalog(&self) -> &[ProductSnapshot] {
        self.catalog.ready().map_or(&[], Vec::as_slice)
    }

    /// The catalog read state, for renderers that distinguish loading from
    /// failed.
    #[must_use]
    pub fn catalog_state(&self) -> &FetchState<Vec<ProductSnapshot>> {
        &self.catalog
    }

    /// Look up a product in the loaded catalog.
    #[must_use]
    pub fn find_product(&self, id: ProductId) -> Option<&ProductSnapshot> {
        self.catalog().iter().find(|product| product.id == id)
    }

    /// Add one unit of a catalog product to the cart.
    ///
    /// Returns `false` when the product is not in the loaded catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> bool {
        match self.find_product(id).cloned() {
            Some(snapshot) => {
                self.cart.add_item(snapshot);
                true
            }
            None => false,
        }
    }

    /// Set a cart line's quantity. Out-of-range values are no-ops, as on the
    /// cart itself.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        self.cart.set_quantity(id, quantity);
    }

    /// Remove a cart line.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.remove_item(id);
    }

    /// Select the payment method for the next sale.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.cart.set_payment_method(method);
    }

    /// The cart, for rendering lines and totals.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current notice, unless it has auto-dismissed.
    #[must_use]
    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|notice| !notice.is_expired_at(now))
    }

    /// Submit the cart as a sale.
    ///
    /// On success the cart is cleared, the catalog reloaded (server-side
    /// stock changed), and a success notice raised. On failure the cart is
    /// left exactly as it was and the server's message becomes an error
    /// notice; resubmitting is the only retry. The cart is cleared if and
    /// only if the server reported success.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Cart`] for an empty cart (refused locally)
    /// or [`CheckoutError::Api`] when the server rejects the sale.
    pub async fn checkout(&mut self) -> Result<SaleRecord, CheckoutError> {
        let request = self.cart.sale_request()?;

        match self.sales.create_sale(&request).await {
            Ok(sale) => {
                self.cart.clear();
                self.load_catalog().await;
                self.notice = Some(Notice::new(
                    NoticeKind::Success,
                    format!("sale #{} recorded", sale.id),
                ));

                Ok(sale)
            }
            Err(error) => {
                self.notice = Some(Notice::new(NoticeKind::Error, error.to_string()));

                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::products::{MockProductsService, ProductRecord};
    use crate::sales::MockSalesService;

    fn record(id: i64, price_minor: i64, stock: u32) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            price: Decimal::new(price_minor, 2),
            stock,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn sale_record() -> SaleRecord {
        SaleRecord {
            id: 42,
            total: Decimal::new(2350, 2),
            payment_method: PaymentMethod::Card,
            user_id: 1,
            items: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn loaded_register(
        products: MockProductsService,
        sales: MockSalesService,
    ) -> Register {
        Register::new(Arc::new(products), Arc::new(sales))
    }

    #[tokio::test]
    async fn load_catalog_failure_degrades_to_an_empty_list() {
        let mut products = MockProductsService::new();
        products.expect_list_products().times(1).returning(|| {
            Err(ApiError::Server {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let mut register = loaded_register(products, MockSalesService::new());
        register.load_catalog().await;

        assert!(register.catalog().is_empty());
        assert_eq!(register.catalog_state().failure(), Some("boom"));
    }

    #[tokio::test]
    async fn add_to_cart_requires_a_loaded_product() {
        let mut products = MockProductsService::new();
        products
            .expect_list_products()
            .returning(|| Ok(vec![record(1, 1000, 5)]));

        let mut register = loaded_register(products, MockSalesService::new());
        register.load_catalog().await;

        assert!(register.add_to_cart(ProductId::new(1)));
        assert!(!register.add_to_cart(ProductId::new(99)));
        assert_eq!(register.cart().len(), 1);
    }

    #[tokio::test]
    async fn checkout_refuses_an_empty_cart_locally() {
        let mut sales = MockSalesService::new();
        sales.expect_create_sale().times(0);

        let mut register = loaded_register(MockProductsService::new(), sales);

        let result = register.checkout().await;

        assert!(matches!(result, Err(CheckoutError::Cart(CartError::Empty))));
    }

    #[tokio::test]
    async fn checkout_failure_leaves_the_cart_untouched() -> TestResult {
        let mut products = MockProductsService::new();
        products
            .expect_list_products()
            .times(1)
            .returning(|| Ok(vec![record(1, 1000, 5), record(2, 350, 1)]));

        let mut sales = MockSalesService::new();
        sales.expect_create_sale().times(1).returning(|_| {
            Err(ApiError::Server {
                status: 409,
                message: "insufficient stock".to_string(),
            })
        });

        let mut register = loaded_register(products, sales);
        register.load_catalog().await;
        register.add_to_cart(ProductId::new(1));
        register.set_quantity(ProductId::new(1), 2);
        register.add_to_cart(ProductId::new(2));
        register.set_payment_method(PaymentMethod::Transfer);

        let result = register.checkout().await;

        assert!(result.is_err());
        assert_eq!(register.cart().len(), 2);
        assert_eq!(register.cart().item_count(), 3);
        assert_eq!(register.cart().payment_method(), PaymentMethod::Transfer);

        let notice = register.notice_at(Instant::now());
        assert_eq!(
            notice.map(|notice| (notice.kind, notice.message.as_str())),
            Some((NoticeKind::Error, "insufficient stock"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_success_clears_the_cart_and_reloads_the_catalog() -> TestResult {
        let mut products = MockProductsService::new();
        // Initial load plus the post-checkout reload.
        products
            .expect_list_products()
            .times(2)
            .returning(|| Ok(vec![record(1, 1000, 5)]));

        let mut sales = MockSalesService::new();
        sales
            .expect_create_sale()
            .times(1)
            .returning(|_| Ok(sale_record()));

        let mut register = loaded_register(products, sales);
        register.load_catalog().await;
        register.add_to_cart(ProductId::new(1));
        register.set_payment_method(PaymentMethod::Card);

        let sale = register.checkout().await?;

        assert_eq!(sale.id, 42);
        assert!(register.cart().is_empty());
        assert_eq!(register.cart().payment_method(), PaymentMethod::Cash);

        let notice = register.notice_at(Instant::now());
        assert_eq!(notice.map(|notice| notice.kind), Some(NoticeKind::Success));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_submits_ids_and_quantities_only() -> TestResult {
        let mut products = MockProductsService::new();
        products
            .expect_list_products()
            .returning(|| Ok(vec![record(7, 500, 10)]));

        let mut sales = MockSalesService::new();
        sales
            .expect_create_sale()
            .times(1)
            .withf(|request| {
                request.items.len() == 1
                    && request.items[0].product_id == ProductId::new(7)
                    && request.items[0].quantity == 4
                    && request.payment_method == PaymentMethod::Cash
            })
            .returning(|_| Ok(sale_record()));

        let mut register = loaded_register(products, sales);
        register.load_catalog().await;
        register.add_to_cart(ProductId::new(7));
        register.set_quantity(ProductId::new(7), 4);
        register.checkout().await?;

        Ok(())
    }

    #[test]
    fn notices_expire_after_their_ttl() {
        let notice = Notice::new(NoticeKind::Success, "done".to_string());
        let now = Instant::now();

        assert!(!notice.is_expired_at(now));
        assert!(notice.is_expired_at(now + NOTICE_TTL + Duration::from_millis(1)));
    }
}
