use clap::{Args, Subcommand};
use jiff::civil::Date;
use kopi_app::{context::AppContext, session::SessionController};
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

#[derive(Debug, Args)]
pub(crate) struct ReportsCommand {
    #[command(subcommand)]
    command: ReportsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReportsSubcommand {
    /// Sales over a date range
    Period(PeriodArgs),
    /// The three best-selling products
    Top,
}

#[derive(Debug, Args)]
struct PeriodArgs {
    /// First day of the range, e.g. 2026-08-01
    #[arg(long)]
    start: Date,

    /// Last day of the range, inclusive
    #[arg(long)]
    end: Date,
}

#[derive(Tabled)]
struct SaleRow {
    id: i64,
    total: Decimal,
    payment: String,
    at: String,
}

#[derive(Tabled)]
struct TopRow {
    product: String,
    quantity: u64,
    revenue: Decimal,
}

pub(crate) async fn run(
    context: &AppContext,
    session: &mut SessionController,
    command: ReportsCommand,
) -> Result<(), String> {
    super::authorize(session, "/dashboard", Some("reports:read"))?;

    match command.command {
        ReportsSubcommand::Period(args) => {
            let report = context
                .reports
                .period_report(args.start, args.end)
                .await
                .map_err(|error| super::api_failure(session, "failed to fetch the period report", error))?;

            let rows: Vec<SaleRow> = report
                .sales
                .iter()
                .map(|sale| SaleRow {
                    id: sale.id,
                    total: sale.total,
                    payment: sale.payment_method.to_string(),
                    at: sale.created_at.to_string(),
                })
                .collect();

            println!("{}", Table::new(rows));
            println!(
                "{} sales between {} and {}, {} revenue",
                report.total_sales, report.start_date, report.end_date, report.total_revenue
            );
        }
        ReportsSubcommand::Top => {
            let report = context
                .reports
                .top_products()
                .await
                .map_err(|error| super::api_failure(session, "failed to fetch top products", error))?;

            let rows: Vec<TopRow> = report
                .products
                .iter()
                .map(|product| TopRow {
                    product: product.name.clone(),
                    quantity: product.total_quantity,
                    revenue: product.total_revenue,
                })
                .collect();

            println!("{}", Table::new(rows));
        }
    }

    Ok(())
}
