//! Contract Dashboard - derived calculations for extracted contract data
//!
//! This library provides:
//! - Parsing of BRL monetary and integer fields with documented defaults
//! - Amortization schedule previews for financing contracts
//! - Early-termination penalty simulation for rental contracts
//! - Keyword classification and regex field extraction from contract text
//! - Batch reports over many contracts

pub mod error;
pub mod fields;
pub mod contract;
pub mod schedule;
pub mod rescission;
pub mod extraction;
pub mod config;
pub mod runner;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use contract::{ContractExtractedData, ContractDataResponse, ContractType};
pub use fields::FieldDefaults;
pub use schedule::{AmortizationEngine, AmortizationEntry, AmortizationSchedule, ScheduleConfig, generate_schedule};
pub use rescission::{RescissionCalculator, RescissionPenalty, RescissionPolicy, calculate_penalty};
pub use config::CalculatorConfig;
pub use runner::{DashboardRunner, ContractReport};
