//! Schedule output structures

use serde::{Deserialize, Serialize};

/// One period of an amortization preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    /// 1-based period index
    pub period: u32,
    pub installment_amount: f64,
    pub interest_portion: f64,
    pub principal_portion: f64,
    /// Balance after this period, never below zero
    pub remaining_balance: f64,
    /// Interest accrued this period exceeded the installment
    pub amortization_insufficient: bool,
}

impl AmortizationEntry {
    /// Principal as a percentage of the installment (0 for a zero installment)
    pub fn principal_share(&self) -> f64 {
        if self.installment_amount == 0.0 {
            0.0
        } else {
            self.principal_portion / self.installment_amount * 100.0
        }
    }
}

/// Bounded amortization preview for one financing contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a 1-based period, falling back to the first entry when out of range
    pub fn entry_for_period(&self, period: u32) -> Option<&AmortizationEntry> {
        period
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx as usize))
            .or_else(|| self.entries.first())
    }

    /// Totals over the previewed periods
    pub fn summary(&self) -> ScheduleSummary {
        let total_installments: f64 = self.entries.iter().map(|e| e.installment_amount).sum();
        let total_interest: f64 = self.entries.iter().map(|e| e.interest_portion).sum();
        let total_principal: f64 = self.entries.iter().map(|e| e.principal_portion).sum();
        let final_balance = self.entries.last().map(|e| e.remaining_balance).unwrap_or(0.0);
        let insufficient_periods = self.entries.iter().filter(|e| e.amortization_insufficient).count() as u32;

        ScheduleSummary {
            periods: self.entries.len() as u32,
            total_installments,
            total_interest,
            total_principal,
            final_balance,
            insufficient_periods,
        }
    }
}

/// Summary statistics for a schedule preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods: u32,
    pub total_installments: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub final_balance: f64,
    pub insufficient_periods: u32,
}
