use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use sales_processor::config::Config;
use sales_processor::{logging, BatchProcessor, BatchResult};

#[derive(Parser)]
#[command(name = "sales_processor")]
#[command(about = "Validate, price and total a sales CSV export")]
#[command(version = "0.1.0")]
struct Cli {
    /// Sales CSV with a header row (product_id, quantity, unit_price, region, date)
    input: PathBuf,

    /// TOML file with pricing and logging settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the batch result as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn print_summary(result: &BatchResult) {
    println!("Processed {} sales", result.processed_count());
    println!("Total revenue: ${:.2}", result.total);
    if result.has_errors() {
        println!("Errors ({}):", result.error_count());
        for e in &result.errors {
            println!("  - {}", e);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    let _guard = logging::init_logging(&config.logging);

    let processor = BatchProcessor::new(config.pricing);
    let result = match processor.process(&cli.input) {
        Ok(result) => result,
        Err(e) => {
            error!("Batch failed: {}", e);
            return Err(e).with_context(|| format!("processing {}", cli.input.display()));
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    Ok(())
}
