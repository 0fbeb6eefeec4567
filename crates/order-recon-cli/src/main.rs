//! Command-line front-end for the unified order comparison report.
//!
//! Loads the three input sheets, runs the reconciliation pipeline and writes
//! the unified CSV report. All business logic lives in `order-recon-core`.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use order_recon_core::{read_table, Reconciler};

#[derive(Parser)]
#[command(name = "order-recon")]
#[command(about = "Unified order comparison & forecast alignment report")]
#[command(version)]
struct Cli {
    /// Draft order sheet (.csv, .xlsx or .xls)
    draft: PathBuf,
    /// Submitted order sheet (.csv, .xlsx or .xls)
    submitted: PathBuf,
    /// Forecast report sheet (.csv, .xlsx or .xls)
    forecast: PathBuf,
    /// Where to write the unified CSV report
    #[arg(short, long, default_value = "unified_comparison_report.csv")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let draft = read_table(&cli.draft)
        .with_context(|| format!("reading draft order {}", cli.draft.display()))?;
    let submitted = read_table(&cli.submitted)
        .with_context(|| format!("reading submitted order {}", cli.submitted.display()))?;
    let forecast = read_table(&cli.forecast)
        .with_context(|| format!("reading forecast report {}", cli.forecast.display()))?;

    let report = Reconciler::new().reconcile(&draft, &submitted, &forecast)?;
    let counts = report.change_counts();

    print!("{}", report.render_table());
    println!();
    println!("Quantity changed: {}", counts.quantity_changed);
    println!("Added:            {}", counts.added);
    println!("Removed:          {}", counts.removed);

    let csv = report.to_csv()?;
    fs::write(&cli.out, csv)
        .with_context(|| format!("writing report to {}", cli.out.display()))?;
    info!(path = %cli.out.display(), records = report.len(), "unified report written");

    Ok(())
}
