//! Amortization preview engine for financing contracts
//!
//! The monthly rate is a fixed assumption, not read from the contract.
//! Each period books `balance * rate` as interest, the rest of the fixed
//! installment as principal, and carries the reduced balance forward.

use serde::{Deserialize, Serialize};

use crate::contract::ContractExtractedData;
use crate::fields::FieldDefaults;
use super::entries::{AmortizationEntry, AmortizationSchedule};

/// Default number of periods materialized in a preview
pub const DEFAULT_HORIZON: u32 = 12;

/// Default monthly interest rate (0.7% a.m.)
pub const DEFAULT_MONTHLY_RATE: f64 = 0.007;

/// Upper bound on entries reserved up front; longer schedules grow as they fill
const MAX_PREALLOCATED_PERIODS: u32 = 360;

/// Treatment of periods where interest meets or exceeds the installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeAmortization {
    /// Principal may go negative and the balance grows
    #[default]
    Preserve,
    /// Principal is clamped to zero, the whole installment is interest and
    /// the balance is left unchanged
    ClampPrincipal,
}

/// Configuration for a schedule preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Maximum number of periods to materialize (at least 1)
    pub horizon: u32,

    /// Fixed monthly interest rate
    pub monthly_rate: f64,

    pub negative_amortization: NegativeAmortization,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            monthly_rate: DEFAULT_MONTHLY_RATE,
            negative_amortization: NegativeAmortization::Preserve,
        }
    }
}

impl ScheduleConfig {
    /// Same config with a different horizon
    pub fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }
}

/// Amortization preview engine
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: ScheduleConfig,
    defaults: FieldDefaults,
}

impl AmortizationEngine {
    /// Create a new engine with given config and field defaults
    pub fn new(config: ScheduleConfig, defaults: FieldDefaults) -> Self {
        Self { config, defaults }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Build the preview schedule for a contract using the configured horizon
    pub fn generate(&self, data: &ContractExtractedData) -> AmortizationSchedule {
        self.generate_with_horizon(data, self.config.horizon)
    }

    /// Build the preview schedule for a contract, at most `horizon` periods
    pub fn generate_with_horizon(&self, data: &ContractExtractedData, horizon: u32) -> AmortizationSchedule {
        let financed_amount = data.financed_amount(&self.defaults);
        let installment_amount = data.installment_amount(&self.defaults);
        let total_installments = data.installment_count(&self.defaults);

        self.project(financed_amount, installment_amount, total_installments, horizon)
    }

    /// Run the period loop on already-resolved inputs
    pub fn project(
        &self,
        financed_amount: f64,
        installment_amount: f64,
        total_installments: i64,
        horizon: u32,
    ) -> AmortizationSchedule {
        let horizon = if horizon == 0 {
            log::warn!("Schedule horizon of 0 requested, using 1");
            1
        } else {
            horizon
        };

        if total_installments <= 0 {
            return AmortizationSchedule::default();
        }

        let periods = (horizon as i64).min(total_installments) as u32;
        let rate = self.config.monthly_rate;
        let mut balance = financed_amount;
        let mut entries = Vec::with_capacity(periods.min(MAX_PREALLOCATED_PERIODS) as usize);

        for period in 1..=periods {
            let accrued = balance * rate;
            let mut interest = accrued;
            let mut principal = installment_amount - accrued;
            let insufficient = principal < 0.0;

            if insufficient && self.config.negative_amortization == NegativeAmortization::ClampPrincipal {
                interest = installment_amount;
                principal = 0.0;
            }

            balance = (balance - principal).max(0.0);

            entries.push(AmortizationEntry {
                period,
                installment_amount,
                interest_portion: interest,
                principal_portion: principal,
                remaining_balance: balance,
                amortization_insufficient: insufficient,
            });
        }

        let schedule = AmortizationSchedule { entries };
        if log::log_enabled!(log::Level::Debug) {
            let summary = schedule.summary();
            log::debug!(
                "Generated {} periods, final balance {:.2}, {} with insufficient amortization",
                summary.periods, summary.final_balance, summary.insufficient_periods
            );
        }
        schedule
    }
}

/// Generate a preview schedule with the standard rate and defaults
pub fn generate_schedule(data: &ContractExtractedData, horizon: u32) -> AmortizationSchedule {
    AmortizationEngine::default().generate_with_horizon(data, horizon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn financing(financed: &str, installment: &str, count: &str) -> ContractExtractedData {
        ContractExtractedData {
            valor_financiado: Some(financed.to_string()),
            valor_parcela: Some(installment.to_string()),
            numero_parcelas: Some(count.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_inputs_are_interest_only() {
        let schedule = generate_schedule(&ContractExtractedData::default(), 12);
        assert_eq!(schedule.len(), 12);

        let first = &schedule.entries[0];
        assert_eq!(first.period, 1);
        assert_abs_diff_eq!(first.installment_amount, 2_450.0, epsilon = 1e-6);
        assert_abs_diff_eq!(first.interest_portion, 2_450.0, epsilon = 1e-6);
        assert_abs_diff_eq!(first.principal_portion, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(first.remaining_balance, 350_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_portions_sum_to_installment() {
        let data = financing("R$ 200.000,00", "R$ 3.100,00", "120");
        let schedule = generate_schedule(&data, 12);

        for entry in &schedule.entries {
            assert_abs_diff_eq!(
                entry.interest_portion + entry.principal_portion,
                entry.installment_amount,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_balance_rolls_forward() {
        let data = financing("R$ 100.000,00", "R$ 1.000,00", "200");
        let schedule = generate_schedule(&data, 12);

        // Month 1: interest 700, principal 300
        assert_abs_diff_eq!(schedule.entries[0].interest_portion, 700.0, epsilon = 1e-6);
        assert_abs_diff_eq!(schedule.entries[0].principal_portion, 300.0, epsilon = 1e-6);
        assert_abs_diff_eq!(schedule.entries[0].remaining_balance, 99_700.0, epsilon = 1e-6);

        // Month 2: interest on the reduced balance
        assert_abs_diff_eq!(schedule.entries[1].interest_portion, 99_700.0 * 0.007, epsilon = 1e-6);

        let mut previous = 100_000.0;
        for entry in &schedule.entries {
            assert_abs_diff_eq!(
                entry.remaining_balance,
                (previous - entry.principal_portion).max(0.0),
                epsilon = 1e-6
            );
            assert!(entry.remaining_balance <= previous);
            assert!(entry.remaining_balance >= 0.0);
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn test_length_bounded_by_installment_count() {
        let data = financing("R$ 10.000,00", "R$ 2.000,00", "5");
        let schedule = generate_schedule(&data, 12);
        assert_eq!(schedule.len(), 5);

        let schedule = generate_schedule(&financing("R$ 10.000,00", "R$ 2.000,00", "500"), 24);
        assert_eq!(schedule.len(), 24);
    }

    #[test]
    fn test_unbounded_horizon_follows_installment_count() {
        let engine = AmortizationEngine::default();

        let schedule = engine.project(10_000.0, 500.0, 30, u32::MAX);
        assert_eq!(schedule.len(), 30);

        let schedule = engine.project(10_000.0, 500.0, 400, u32::MAX);
        assert_eq!(schedule.len(), 400);
        assert_eq!(schedule.entries[399].period, 400);
    }

    #[test]
    fn test_balance_floored_at_zero() {
        let data = financing("R$ 1.000,00", "R$ 600,00", "12");
        let schedule = generate_schedule(&data, 12);

        assert_abs_diff_eq!(schedule.entries[0].remaining_balance, 407.0, epsilon = 1e-6);
        assert_eq!(schedule.entries[1].remaining_balance, 0.0);
        for entry in &schedule.entries {
            assert!(entry.remaining_balance >= 0.0);
        }
    }

    #[test]
    fn test_non_positive_installment_count_yields_empty() {
        assert!(generate_schedule(&financing("R$ 1.000,00", "R$ 100,00", "0"), 12).is_empty());
        assert!(generate_schedule(&financing("R$ 1.000,00", "R$ 100,00", "-3"), 12).is_empty());
    }

    #[test]
    fn test_zero_horizon_treated_as_one() {
        let schedule = generate_schedule(&ContractExtractedData::default(), 0);
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_negative_amortization_preserved_by_default() {
        // Interest 700 exceeds the 500 installment
        let data = financing("R$ 100.000,00", "R$ 500,00", "360");
        let schedule = generate_schedule(&data, 3);

        let first = &schedule.entries[0];
        assert!(first.amortization_insufficient);
        assert_abs_diff_eq!(first.principal_portion, -200.0, epsilon = 1e-6);
        assert_abs_diff_eq!(first.remaining_balance, 100_200.0, epsilon = 1e-6);
        assert!(schedule.entries[2].remaining_balance > schedule.entries[1].remaining_balance);
    }

    #[test]
    fn test_negative_amortization_clamped_when_configured() {
        let config = ScheduleConfig {
            negative_amortization: NegativeAmortization::ClampPrincipal,
            ..Default::default()
        };
        let engine = AmortizationEngine::new(config, FieldDefaults::default());
        let schedule = engine.generate(&financing("R$ 100.000,00", "R$ 500,00", "360"));

        for entry in &schedule.entries {
            assert!(entry.amortization_insufficient);
            assert_eq!(entry.principal_portion, 0.0);
            assert_abs_diff_eq!(entry.interest_portion, 500.0, epsilon = 1e-6);
            assert_abs_diff_eq!(entry.remaining_balance, 100_000.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        let data = financing("R$ 250.000,00", "R$ 2.900,00", "300");
        assert_eq!(generate_schedule(&data, 12), generate_schedule(&data, 12));
    }

    #[test]
    fn test_custom_rate() {
        let config = ScheduleConfig { monthly_rate: 0.01, ..Default::default() };
        let engine = AmortizationEngine::new(config, FieldDefaults::default());
        let schedule = engine.project(10_000.0, 500.0, 24, 1);

        assert_abs_diff_eq!(schedule.entries[0].interest_portion, 100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(schedule.entries[0].remaining_balance, 9_600.0, epsilon = 1e-6);
    }
}
