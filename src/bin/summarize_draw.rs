//! Summarize a single prize draw workbook from the command line
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use prize_draw_service::currency::CurrencyFormat;
use prize_draw_service::importers::DatasetLoader;
use prize_draw_service::models::DrawSummary;
use prize_draw_service::services::{aggregate, summarize, DEFAULT_TOP_LOCATIONS};

#[derive(Parser)]
#[command(name = "summarize-draw")]
#[command(about = "Summarize the winners in a prize draw workbook", long_about = None)]
struct Cli {
    /// Path to the prize draw workbook (first sheet is read)
    file: PathBuf,

    /// Number of top locations to show
    #[arg(long, default_value_t = DEFAULT_TOP_LOCATIONS)]
    top: usize,

    /// Print the full summary as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// List every accepted record in the report
    #[arg(long)]
    records: bool,

    /// Currency code used for display
    #[arg(long, env, default_value = "GBP")]
    currency_code: String,

    /// Currency symbol used for display
    #[arg(long, env, default_value = "£")]
    currency_symbol: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if it exists (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let currency = CurrencyFormat::new(cli.currency_code.clone(), cli.currency_symbol.clone());

    let dataset = DatasetLoader::new(&cli.file).load()?;
    let aggregate = aggregate(&dataset.records);

    let name = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());
    let summary = summarize(&name, &dataset, &aggregate, cli.top, &currency);
    info!("Summarized {} from sheet {}", name, dataset.sheet_name);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&summary, cli.records);
    }

    Ok(())
}

fn print_report(summary: &DrawSummary, show_records: bool) {
    println!("Draw: {}", summary.dataset);
    println!(
        "Records: {} ({} rows rejected)",
        summary.record_count, summary.rejected_row_count
    );
    println!("Total money won: {}", summary.total_money_won_display);

    println!("\nTop locations:");
    if summary.top_locations.is_empty() {
        println!("  (none)");
    }
    for (rank, location) in summary.top_locations.iter().enumerate() {
        println!("  {}. {} ({})", rank + 1, location.area, location.count);
    }

    println!("\nLowest holding per prize:");
    for lowest in &summary.lowest_holdings {
        println!(
            "  {:>14}  bond {}  holding {}  {}",
            lowest.prize_value_display,
            lowest.record.bond_number,
            lowest.total_value_of_holding_display,
            lowest.record.area
        );
    }

    if show_records {
        println!("\nRecords:");
        for record in &summary.records {
            println!(
                "  {:>14}  {:<14} {:>14}  {:<20} {:>10}  {}",
                record.prize_value_display,
                record.bond_number,
                record.total_value_of_holding_display,
                record.area,
                record.value_of_bond_display,
                record.date_of_purchase
            );
        }
    }
}
