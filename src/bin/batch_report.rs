//! Run reports for every contract in a JSON export
//!
//! Writes one CSV row per contract and prints per-type totals

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use contract_dashboard::{contract::load_contracts, runner::write_report_csv, CalculatorConfig, DashboardRunner};

#[derive(Parser, Debug)]
#[command(name = "batch_report", about = "Derived data for a batch of contracts")]
struct Args {
    /// JSON array of contract payloads
    #[arg(short = 'i', long = "input", default_value = "contracts.json")]
    input: PathBuf,

    /// CSV output path
    #[arg(short = 'o', long = "output", default_value = "contract_report.csv")]
    output: PathBuf,

    /// Calculator config (JSON)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

/// Totals for one contract type
#[derive(Debug, Default)]
struct TypeTotals {
    contracts: usize,
    total_interest: f64,
    total_principal: f64,
    insufficient_periods: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CalculatorConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    let start = Instant::now();
    println!("Loading contracts from {}...", args.input.display());
    let contracts = load_contracts(&args.input)
        .with_context(|| format!("Failed to load contracts from {}", args.input.display()))?;
    println!("Loaded {} contracts in {:?}", contracts.len(), start.elapsed());

    let runner = DashboardRunner::with_config(config);
    let run_start = Instant::now();
    let reports = runner.report_batch(&contracts);
    println!("Reports complete in {:?}", run_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_report_csv(BufWriter::new(file), &reports)?;

    let mut totals: BTreeMap<&'static str, TypeTotals> = BTreeMap::new();
    for report in &reports {
        let row = report.to_row();
        let entry = totals.entry(row.contract_type).or_default();
        entry.contracts += 1;
        entry.total_interest += row.total_interest.unwrap_or(0.0);
        entry.total_principal += row.total_principal.unwrap_or(0.0);
        entry.insufficient_periods += row.insufficient_periods.unwrap_or(0);
    }

    println!("\nResults written to: {}", args.output.display());
    println!("\n{:<10} {:>10} {:>16} {:>16} {:>12}", "Type", "Contracts", "Interest", "Principal", "Insufficient");
    println!("{}", "-".repeat(68));
    for (kind, t) in &totals {
        println!("{:<10} {:>10} {:>16.2} {:>16.2} {:>12}",
            kind, t.contracts, t.total_interest, t.total_principal, t.insufficient_periods);
    }

    Ok(())
}
