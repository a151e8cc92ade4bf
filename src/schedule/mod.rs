//! Amortization schedule previews for financing contracts

mod engine;
mod entries;

pub use engine::{
    AmortizationEngine, ScheduleConfig, NegativeAmortization, generate_schedule,
    DEFAULT_HORIZON, DEFAULT_MONTHLY_RATE,
};
pub use entries::{AmortizationEntry, AmortizationSchedule, ScheduleSummary};
