//! Cart
//!
//! In-memory shopping cart for the register: ordered lines keyed by product
//! id, a selected payment method, and pure selectors over both. Mutations
//! that would break an invariant (quantity of zero, quantity above the
//! captured stock ceiling) are silent no-ops rather than errors; the
//! affordance mirrors the register UI, and the server re-validates stock at
//! checkout anyway.

use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    payment::PaymentMethod,
    products::{ProductId, ProductSnapshot},
};

/// Errors related to building a checkout request from the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The cart has no lines; checkout is refused locally.
    #[error("cart is empty")]
    Empty,
}

/// One product-quantity pairing in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: ProductSnapshot,
    quantity: u32,
}

impl CartLine {
    /// The product snapshot captured when this line was created.
    #[must_use]
    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    /// Current quantity. Always at least 1 and at most the captured stock.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Captured unit price times the current quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The register's shopping cart.
///
/// Lines keep insertion order, which is also display order. At most one line
/// exists per product id. The cart is ephemeral session state: it survives
/// navigation but not a restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
    payment_method: PaymentMethod,
}

impl Cart {
    /// Create an empty cart with the default payment method.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product` to the cart.
    ///
    /// Creates a new line with quantity 1 when the product is not in the cart
    /// yet. When a line already exists, increments its quantity by 1 unless
    /// that would exceed the stock ceiling captured on the line, in which
    /// case nothing changes. A snapshot with zero stock never enters the
    /// cart: a line at quantity 1 would already sit above its ceiling.
    pub fn add_item(&mut self, product: ProductSnapshot) {
        if let Some(line) = self.line_mut(product.id) {
            if line.quantity < line.product.stock {
                line.quantity += 1;
            }

            return;
        }

        if product.stock > 0 {
            self.lines.push(CartLine {
                product,
                quantity: 1,
            });
        }
    }

    /// Remove the line for `id`, if present.
    pub fn remove_item(&mut self, id: ProductId) {
        self.lines.retain(|line| line.product.id != id);
    }

    /// Set the quantity of the line for `id`.
    ///
    /// Applies only when the line exists and `0 < quantity <= stock` for the
    /// captured stock ceiling; everything else is a no-op. Zero is rejected
    /// deliberately: removal goes through [`Cart::remove_item`].
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if let Some(line) = self.line_mut(id)
            && quantity > 0
            && quantity <= line.product.stock
        {
            line.quantity = quantity;
        }
    }

    /// Replace the selected payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Empty the cart and reset the payment method to cash.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.payment_method = PaymentMethod::default();
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The currently selected payment method.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Sum of captured unit price times quantity across all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Build the checkout payload from the current cart state.
    ///
    /// Prices are deliberately absent: the server is the source of truth for
    /// price-at-sale and recomputes the total on its side.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] when the cart has no lines.
    pub fn sale_request(&self) -> Result<SaleRequest, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }

        Ok(SaleRequest {
            items: self
                .lines
                .iter()
                .map(|line| SaleRequestItem {
                    product_id: line.product.id,
                    quantity: line.quantity,
                })
                .collect(),
            payment_method: self.payment_method,
        })
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }
}

/// Checkout payload submitted to the sales endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    /// Product-quantity pairs in cart display order.
    pub items: Vec<SaleRequestItem>,

    /// Selected payment method.
    pub payment_method: PaymentMethod,
}

/// One item of a [`SaleRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequestItem {
    /// Product to sell.
    pub product_id: ProductId,

    /// Units to sell.
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn snapshot(id: i64, price_minor: i64, stock: u32) -> ProductSnapshot {
        ProductSnapshot::new(
            ProductId::new(id),
            format!("product-{id}"),
            Decimal::new(price_minor, 2),
            stock,
        )
    }

    #[test]
    fn add_item_creates_a_single_line() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(1, 100, 5));
        cart.add_item(snapshot(1, 100, 5));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(ProductId::new(1)).map(CartLine::quantity), Some(2));
    }

    #[test]
    fn add_item_stops_at_the_stock_ceiling() {
        let mut cart = Cart::new();

        for _ in 0..5 {
            cart.add_item(snapshot(1, 100, 3));
        }

        assert_eq!(cart.line(ProductId::new(1)).map(CartLine::quantity), Some(3));
    }

    #[test]
    fn add_item_preserves_insertion_order() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(3, 100, 5));
        cart.add_item(snapshot(1, 100, 5));
        cart.add_item(snapshot(2, 100, 5));

        let order: Vec<_> = cart.lines().map(|line| line.product().id.get()).collect();

        assert_eq!(order, [3, 1, 2]);
    }

    #[test]
    fn remove_item_deletes_the_line() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(1, 100, 5));
        cart.remove_item(ProductId::new(1));

        assert!(cart.is_empty());
    }

    #[test]
    fn remove_item_is_a_noop_for_unknown_ids() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(1, 100, 5));
        cart.remove_item(ProductId::new(99));

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn set_quantity_applies_within_bounds() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(1, 100, 5));
        cart.set_quantity(ProductId::new(1), 5);

        assert_eq!(cart.line(ProductId::new(1)).map(CartLine::quantity), Some(5));
    }

    #[test]
    fn set_quantity_rejects_zero() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(1, 100, 5));
        cart.set_quantity(ProductId::new(1), 3);
        cart.set_quantity(ProductId::new(1), 0);

        // Line still present at its prior quantity; removal is remove_item's job.
        assert_eq!(cart.line(ProductId::new(1)).map(CartLine::quantity), Some(3));
    }

    #[test]
    fn set_quantity_rejects_values_above_stock() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(1, 100, 4));
        cart.set_quantity(ProductId::new(1), 9);

        assert_eq!(cart.line(ProductId::new(1)).map(CartLine::quantity), Some(1));
    }

    #[test]
    fn clear_resets_lines_and_payment_method() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(1, 100, 5));
        cart.set_payment_method(PaymentMethod::Transfer);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.payment_method(), PaymentMethod::Cash);
    }

    #[test]
    fn totals_for_a_mixed_cart() {
        let mut cart = Cart::new();

        cart.add_item(snapshot(1, 1000, 5));
        cart.set_quantity(ProductId::new(1), 2);
        cart.add_item(snapshot(2, 350, 1));

        assert_eq!(cart.total(), Decimal::new(2350, 2));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let cart = Cart::new();

        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn sale_request_refuses_an_empty_cart() {
        let cart = Cart::new();

        assert_eq!(cart.sale_request(), Err(CartError::Empty));
    }

    #[test]
    fn sale_request_carries_items_and_payment_method() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(snapshot(7, 500, 10));
        cart.set_quantity(ProductId::new(7), 4);
        cart.add_item(snapshot(2, 350, 3));
        cart.set_payment_method(PaymentMethod::Card);

        let request = cart.sale_request()?;

        assert_eq!(
            request.items,
            [
                SaleRequestItem {
                    product_id: ProductId::new(7),
                    quantity: 4,
                },
                SaleRequestItem {
                    product_id: ProductId::new(2),
                    quantity: 1,
                },
            ]
        );
        assert_eq!(request.payment_method, PaymentMethod::Card);

        Ok(())
    }

    #[test]
    fn sale_request_serializes_without_prices() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(snapshot(7, 500, 10));

        let json = serde_json::to_value(cart.sale_request()?)?;

        assert_eq!(
            json,
            serde_json::json!({
                "items": [{ "productId": 7, "quantity": 1 }],
                "paymentMethod": "CASH",
            })
        );

        Ok(())
    }
}
