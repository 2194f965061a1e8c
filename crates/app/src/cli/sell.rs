use std::time::Instant;

use clap::Args;
use kopi::{payment::PaymentMethod, products::ProductId};
use kopi_app::{
    context::AppContext,
    register::{CheckoutError, Register},
    session::SessionController,
};
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

/// One `--item` occurrence: `PRODUCT_ID:QUANTITY`, or a bare `PRODUCT_ID`
/// for a single unit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ItemSpec {
    id: i64,
    quantity: u32,
}

fn parse_item_spec(value: &str) -> Result<ItemSpec, String> {
    let (id, quantity) = match value.split_once(':') {
        Some((id, quantity)) => (
            id.parse::<i64>().map_err(|_| bad_item(value))?,
            quantity.parse::<u32>().map_err(|_| bad_item(value))?,
        ),
        None => (value.parse::<i64>().map_err(|_| bad_item(value))?, 1),
    };

    if quantity == 0 {
        return Err(bad_item(value));
    }

    Ok(ItemSpec { id, quantity })
}

fn bad_item(value: &str) -> String {
    format!("invalid item spec `{value}`; expected PRODUCT_ID or PRODUCT_ID:QUANTITY")
}

#[derive(Debug, Args)]
pub(crate) struct SellArgs {
    /// Item to sell, repeatable: PRODUCT_ID or PRODUCT_ID:QUANTITY
    #[arg(long = "item", value_parser = parse_item_spec, required = true)]
    items: Vec<ItemSpec>,

    /// Payment method: cash, card or transfer
    #[arg(long, default_value = "cash")]
    payment: PaymentMethod,
}

#[derive(Tabled)]
struct LineRow {
    product: String,
    quantity: u32,
    unit: Decimal,
    total: Decimal,
}

pub(crate) async fn run(
    context: &AppContext,
    session: &mut SessionController,
    args: SellArgs,
) -> Result<(), String> {
    super::authorize(session, "/pos", Some("sales:create"))?;

    let mut register = Register::new(
        context.products.clone(),
        context.sales.clone(),
    );

    register.load_catalog().await;

    if let Some(message) = register.catalog_state().failure() {
        return Err(format!("could not load the catalog: {message}"));
    }

    for item in &args.items {
        let id = ProductId::new(item.id);

        if !register.add_to_cart(id) {
            return Err(format!("product {} is not in the catalog", item.id));
        }

        register.set_quantity(id, item.quantity);

        let in_cart = register
            .cart()
            .line(id)
            .map(|line| line.quantity())
            .unwrap_or_default();

        if in_cart != item.quantity {
            return Err(format!(
                "cannot sell {} of product {}: only {} available",
                item.quantity,
                item.id,
                register
                    .find_product(id)
                    .map(|product| product.stock)
                    .unwrap_or_default()
            ));
        }
    }

    register.set_payment_method(args.payment);

    let rows: Vec<LineRow> = register
        .cart()
        .lines()
        .map(|line| LineRow {
            product: line.product().name.clone(),
            quantity: line.quantity(),
            unit: line.product().price,
            total: line.line_total(),
        })
        .collect();

    println!("{}", Table::new(rows));
    println!(
        "{} items, {} total, paying by {}",
        register.cart().item_count(),
        register.cart().total(),
        register.cart().payment_method()
    );

    let sale = register.checkout().await.map_err(|error| {
        if let CheckoutError::Api(api_error) = &error {
            session.observe_api_error(api_error);
        }

        format!("checkout failed: {error}")
    })?;

    if let Some(notice) = register.notice_at(Instant::now()) {
        println!("{}", notice.message);
    }

    println!("server total: {}", sale.total);

    Ok(())
}
