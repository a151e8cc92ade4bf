//! Early-termination penalty for rental contracts
//!
//! Terminating in the first half of the lease costs three months of rent,
//! afterwards one month. The midpoint itself counts as the first half.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::contract::ContractExtractedData;
use crate::fields::FieldDefaults;

/// Months offered by the dashboard's termination simulator
pub const SIMULATOR_MONTHS: RangeInclusive<i64> = 1..=12;

/// Rent multipliers applied on each side of the lease midpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RescissionPolicy {
    /// Multiplier when terminating at or before the midpoint
    pub early_multiplier: f64,
    /// Multiplier when terminating after the midpoint
    pub late_multiplier: f64,
}

impl Default for RescissionPolicy {
    fn default() -> Self {
        Self {
            early_multiplier: 3.0,
            late_multiplier: 1.0,
        }
    }
}

/// Penalty for terminating a lease in a given month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescissionPenalty {
    /// 1-based month chosen by the user; not range checked
    pub termination_month: i64,
    pub penalty_amount: f64,
    pub rent_multiplier: f64,
    /// Termination falls at or before half of the lease term
    pub first_half: bool,
}

/// Penalty calculator bound to a policy and a set of field defaults
#[derive(Debug, Clone, Default)]
pub struct RescissionCalculator {
    policy: RescissionPolicy,
    defaults: FieldDefaults,
}

impl RescissionCalculator {
    pub fn new(policy: RescissionPolicy, defaults: FieldDefaults) -> Self {
        Self { policy, defaults }
    }

    /// Penalty for terminating in `termination_month`
    pub fn calculate(&self, data: &ContractExtractedData, termination_month: i64) -> RescissionPenalty {
        let rent = data.rent_amount(&self.defaults);
        let lease_months = data.lease_months(&self.defaults);
        self.penalty_for(rent, lease_months, termination_month)
    }

    /// Penalties for every month in `months`
    pub fn table(&self, data: &ContractExtractedData, months: RangeInclusive<i64>) -> Vec<RescissionPenalty> {
        let rent = data.rent_amount(&self.defaults);
        let lease_months = data.lease_months(&self.defaults);
        months
            .map(|month| self.penalty_for(rent, lease_months, month))
            .collect()
    }

    fn penalty_for(&self, rent: f64, lease_months: i64, termination_month: i64) -> RescissionPenalty {
        let half = lease_months as f64 / 2.0;
        let first_half = termination_month as f64 <= half;
        let rent_multiplier = if first_half {
            self.policy.early_multiplier
        } else {
            self.policy.late_multiplier
        };

        RescissionPenalty {
            termination_month,
            penalty_amount: rent * rent_multiplier,
            rent_multiplier,
            first_half,
        }
    }
}

/// Penalty with the standard 3x/1x policy and defaults
pub fn calculate_penalty(data: &ContractExtractedData, termination_month: i64) -> RescissionPenalty {
    RescissionCalculator::default().calculate(data, termination_month)
}

/// Penalties with the standard policy for a range of termination months
pub fn penalty_table(data: &ContractExtractedData, months: RangeInclusive<i64>) -> Vec<RescissionPenalty> {
    RescissionCalculator::default().table(data, months)
}
