use clap::{Args, Subcommand};
use kopi::products::ProductId;
use kopi_app::{
    context::AppContext,
    products::{NewProduct, ProductPatch, ProductRecord},
    session::SessionController,
    validate,
};
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the catalog
    List,
    /// Create a product
    Create(CreateArgs),
    /// Update name, price or stock of a product
    Update(UpdateArgs),
    /// Delete a product
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    /// Unit price, e.g. 3.50
    #[arg(long)]
    price: Decimal,

    /// Initial stock
    #[arg(long)]
    stock: u32,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: i64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    price: Option<Decimal>,

    #[arg(long)]
    stock: Option<u32>,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    id: i64,
}

#[derive(Tabled)]
struct ProductRow {
    id: i64,
    name: String,
    price: Decimal,
    stock: u32,
}

impl From<&ProductRecord> for ProductRow {
    fn from(record: &ProductRecord) -> Self {
        Self {
            id: record.id.get(),
            name: record.name.clone(),
            price: record.price,
            stock: record.stock,
        }
    }
}

pub(crate) async fn run(
    context: &AppContext,
    session: &mut SessionController,
    command: ProductsCommand,
) -> Result<(), String> {
    super::authorize(session, "/products", Some("products:manage"))?;

    match command.command {
        ProductsSubcommand::List => {
            let records = context
                .products
                .list_products()
                .await
                .map_err(|error| super::api_failure(session, "failed to list products", error))?;

            let rows: Vec<ProductRow> = records.iter().map(ProductRow::from).collect();
            println!("{}", Table::new(rows));
        }
        ProductsSubcommand::Create(args) => {
            validate::product(&args.name, args.price)
                .map_err(|errors| format!("invalid product: {errors}"))?;

            let created = context
                .products
                .create_product(&NewProduct {
                    name: args.name,
                    price: args.price,
                    stock: args.stock,
                })
                .await
                .map_err(|error| super::api_failure(session, "failed to create product", error))?;

            println!("created product {} ({})", created.id, created.name);
        }
        ProductsSubcommand::Update(args) => {
            if args.name.is_none() && args.price.is_none() && args.stock.is_none() {
                return Err("nothing to update; pass --name, --price or --stock".to_string());
            }

            if let Some(name) = &args.name
                && name.trim().chars().count() < 2
            {
                return Err("name must have at least 2 characters".to_string());
            }

            if let Some(price) = args.price
                && price <= Decimal::ZERO
            {
                return Err("price must be greater than 0".to_string());
            }

            let updated = context
                .products
                .update_product(
                    ProductId::new(args.id),
                    &ProductPatch {
                        name: args.name,
                        price: args.price,
                        stock: args.stock,
                    },
                )
                .await
                .map_err(|error| super::api_failure(session, "failed to update product", error))?;

            println!(
                "updated product {}: {} @ {} ({} in stock)",
                updated.id, updated.name, updated.price, updated.stock
            );
        }
        ProductsSubcommand::Delete(args) => {
            context
                .products
                .delete_product(ProductId::new(args.id))
                .await
                .map_err(|error| super::api_failure(session, "failed to delete product", error))?;

            println!("deleted product {}", args.id);
        }
    }

    Ok(())
}
