use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;

mod error;
mod paystub;
mod summary;
mod tax;

use error::EstimateError;

/// Estimate joint federal taxes and suggest per-spouse withholding targets
#[derive(Parser, Debug)]
#[command(name = "withhold", version, about)]
struct Cli {
    /// Create a CSV input template at PATH and exit
    #[arg(long, value_name = "PATH")]
    create_template: Option<PathBuf>,

    /// CSV input with YTD paystub data for both spouses
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Federal tax year to use for brackets
    #[arg(long, default_value_t = 2024)]
    tax_year: i32,

    /// Optional last year total tax for reference
    #[arg(long)]
    last_year_tax: Option<Decimal>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Some(path) = cli.create_template {
        paystub::write_template(&path)
            .with_context(|| format!("failed to write template to {}", path.display()))?;
        println!("Template created at {}", path.display());
        return Ok(());
    }

    let Some(input) = cli.input else {
        return Err(EstimateError::MissingInput.into());
    };

    let schedule = tax::schedule::for_year(cli.tax_year)?;

    let file = File::open(&input)
        .with_context(|| format!("failed to open input file {}", input.display()))?;
    let records = paystub::read_records(BufReader::new(file))?;
    log::debug!("loaded paystub data for {} and {}", records[0].spouse, records[1].spouse);

    let results = tax::compute_results(&records, &schedule)?;

    if cli.json {
        summary::print_json(&results, &schedule, cli.last_year_tax)?;
    } else {
        summary::print_summary(&results, &schedule, cli.last_year_tax);
    }
    Ok(())
}
