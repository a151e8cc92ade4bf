//! Dashboard runner for per-contract derived data
//!
//! Builds the calculators once from a config, then produces reports for
//! single contracts or whole batches.

use std::io::Write;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::contract::{ContractDataResponse, ContractType, ProcessingStatus};
use crate::error::Result;
use crate::rescission::{RescissionCalculator, RescissionPenalty, SIMULATOR_MONTHS};
use crate::schedule::{AmortizationEngine, AmortizationSchedule, ScheduleSummary};

/// Derived data for one contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractReport {
    pub contract_id: u64,
    pub contract_type: ContractType,
    pub status: ProcessingStatus,

    /// Amortization preview (financing contracts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<AmortizationSchedule>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_summary: Option<ScheduleSummary>,

    /// Penalty per simulator month (rental contracts only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub penalties: Vec<RescissionPenalty>,

    /// Extracted dates that parse as calendar dates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<NaiveDate>,
}

impl ContractReport {
    /// Flatten into one CSV-friendly row
    pub fn to_row(&self) -> ReportRow {
        let summary = self.schedule_summary.as_ref();
        ReportRow {
            contract_id: self.contract_id,
            contract_type: self.contract_type.as_str(),
            periods: summary.map(|s| s.periods),
            total_interest: summary.map(|s| s.total_interest),
            total_principal: summary.map(|s| s.total_principal),
            final_balance: summary.map(|s| s.final_balance),
            insufficient_periods: summary.map(|s| s.insufficient_periods),
            max_penalty: self.penalties.iter().map(|p| p.penalty_amount).reduce(f64::max),
            min_penalty: self.penalties.iter().map(|p| p.penalty_amount).reduce(f64::min),
        }
    }
}

/// One line of the batch CSV report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub contract_id: u64,
    pub contract_type: &'static str,
    pub periods: Option<u32>,
    pub total_interest: Option<f64>,
    pub total_principal: Option<f64>,
    pub final_balance: Option<f64>,
    pub insufficient_periods: Option<u32>,
    pub max_penalty: Option<f64>,
    pub min_penalty: Option<f64>,
}

/// Write one CSV row per report, with a header line
pub fn write_report_csv<W: Write>(writer: W, reports: &[ContractReport]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for report in reports {
        csv_writer.serialize(report.to_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Pre-built calculators for producing contract reports
#[derive(Debug, Clone, Default)]
pub struct DashboardRunner {
    engine: AmortizationEngine,
    rescission: RescissionCalculator,
}

impl DashboardRunner {
    /// Create runner with the standard configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner from a loaded config
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            engine: AmortizationEngine::new(config.schedule, config.defaults.clone()),
            rescission: RescissionCalculator::new(config.rescission, config.defaults),
        }
    }

    pub fn engine(&self) -> &AmortizationEngine {
        &self.engine
    }

    pub fn rescission(&self) -> &RescissionCalculator {
        &self.rescission
    }

    /// Build the report for one contract
    pub fn report(&self, contract: &ContractDataResponse) -> ContractReport {
        let contract_type = contract.kind();
        let data = &contract.extracted_data;

        let (schedule, penalties) = match contract_type {
            ContractType::Financing => (Some(self.engine.generate(data)), Vec::new()),
            ContractType::Rental => (None, self.rescission.table(data, SIMULATOR_MONTHS)),
            ContractType::Insurance | ContractType::Unknown => (None, Vec::new()),
        };
        let schedule_summary = schedule.as_ref().map(AmortizationSchedule::summary);

        ContractReport {
            contract_id: contract.id,
            contract_type,
            status: contract.status,
            schedule,
            schedule_summary,
            penalties,
            dates: data.parsed_dates(),
        }
    }

    /// Build reports for many contracts in parallel, preserving input order
    pub fn report_batch(&self, contracts: &[ContractDataResponse]) -> Vec<ContractReport> {
        contracts.par_iter().map(|c| self.report(c)).collect()
    }
}
