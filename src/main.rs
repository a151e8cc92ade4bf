//! Contract Dashboard CLI
//!
//! Command-line access to the schedule preview, penalty simulator and text extractor

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use contract_dashboard::{
    contract::{load_contracts, load_extracted_data, ContractExtractedData},
    extraction::{process_document, read_text_file},
    rescission::SIMULATOR_MONTHS,
    runner::write_report_csv,
    AmortizationSchedule, CalculatorConfig, DashboardRunner, RescissionPenalty,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "contract_dashboard", version, about = "Derived calculations for extracted contract data")]
struct Cli {
    /// Calculator config (JSON); standard values when omitted
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Amortization preview for a financing contract
    Schedule {
        /// Extracted data or contract payload (JSON); defaults when omitted
        #[arg(short = 'd', long = "data")]
        data: Option<PathBuf>,

        /// Number of periods to preview
        #[arg(long = "horizon")]
        horizon: Option<u32>,
    },
    /// Early-termination penalty for a rental contract
    Penalty {
        /// Extracted data or contract payload (JSON); defaults when omitted
        #[arg(short = 'd', long = "data")]
        data: Option<PathBuf>,

        /// Termination month; prints months 1-12 when omitted
        #[arg(short = 'm', long = "month", allow_negative_numbers = true)]
        month: Option<i64>,
    },
    /// Classify a contract text file and extract its fields
    Classify {
        /// Plain text contract
        #[arg(short = 't', long = "text")]
        text: PathBuf,
    },
    /// Reports for a JSON array of contract payloads
    Report {
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };
    let runner = DashboardRunner::with_config(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Schedule { data, horizon } => {
            let data = load_data(data.as_deref())?;
            let horizon = horizon.unwrap_or(runner.engine().config().horizon);
            let schedule = runner.engine().generate_with_horizon(&data, horizon);
            write_schedule(&mut out, &schedule, cli.format)?;
        }
        Command::Penalty { data, month } => {
            let data = load_data(data.as_deref())?;
            let penalties = match month {
                Some(month) => vec![runner.rescission().calculate(&data, month)],
                None => runner.rescission().table(&data, SIMULATOR_MONTHS),
            };
            write_penalties(&mut out, &penalties, cli.format)?;
        }
        Command::Classify { text } => {
            let text = read_text_file(&text)
                .with_context(|| format!("Failed to read {}", text.display()))?;
            let (contract_type, data) = process_document(&text);
            let payload = serde_json::json!({
                "contract_type": contract_type,
                "parsed_dates": data.parsed_dates(),
                "extracted_data": data,
            });
            serde_json::to_writer_pretty(&mut out, &payload)?;
            writeln!(out)?;
        }
        Command::Report { input } => {
            let contracts = load_contracts(&input)
                .with_context(|| format!("Failed to load contracts from {}", input.display()))?;
            let reports = runner.report_batch(&contracts);
            match cli.format {
                OutputFormat::Csv => write_report_csv(&mut out, &reports)?,
                _ => {
                    serde_json::to_writer_pretty(&mut out, &reports)?;
                    writeln!(out)?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn load_data(path: Option<&Path>) -> anyhow::Result<ContractExtractedData> {
    let Some(path) = path else {
        log::info!("No contract data given, using defaults");
        return Ok(ContractExtractedData::default());
    };

    load_extracted_data(path).with_context(|| format!("Failed to load contract data from {}", path.display()))
}

fn write_schedule<W: Write>(out: &mut W, schedule: &AmortizationSchedule, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, schedule)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for entry in &schedule.entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "{:>6} {:>14} {:>14} {:>14} {:>16} {:>8}",
                "Period", "Installment", "Interest", "Principal", "Balance", "Princ%")?;
            writeln!(out, "{}", "-".repeat(77))?;
            for entry in &schedule.entries {
                writeln!(out, "{:>6} {:>14.2} {:>14.2} {:>14.2} {:>16.2} {:>7.1}%{}",
                    entry.period,
                    entry.installment_amount,
                    entry.interest_portion,
                    entry.principal_portion,
                    entry.remaining_balance,
                    entry.principal_share(),
                    if entry.amortization_insufficient { "  !" } else { "" },
                )?;
            }

            let summary = schedule.summary();
            writeln!(out)?;
            writeln!(out, "Periods: {}", summary.periods)?;
            writeln!(out, "Total interest: R$ {:.2}", summary.total_interest)?;
            writeln!(out, "Total principal: R$ {:.2}", summary.total_principal)?;
            writeln!(out, "Final balance: R$ {:.2}", summary.final_balance)?;
            if summary.insufficient_periods > 0 {
                writeln!(out, "Periods where interest exceeds the installment: {}", summary.insufficient_periods)?;
            }
        }
    }
    Ok(())
}

fn write_penalties<W: Write>(out: &mut W, penalties: &[RescissionPenalty], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, penalties)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for penalty in penalties {
                writer.serialize(penalty)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "{:>6} {:>6} {:>14}", "Month", "Rents", "Penalty")?;
            writeln!(out, "{}", "-".repeat(28))?;
            for penalty in penalties {
                writeln!(out, "{:>6} {:>6.1} {:>14.2}",
                    penalty.termination_month,
                    penalty.rent_multiplier,
                    penalty.penalty_amount,
                )?;
            }
        }
    }
    Ok(())
}
