//! Calculator configuration
//!
//! Every field has a default matching the standard dashboard behaviour, so
//! a config file only needs the values it overrides:
//!
//! ```json
//! { "schedule": { "horizon": 24, "negative_amortization": "clamp_principal" },
//!   "defaults": { "rent_amount": 1200.0 } }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::fields::FieldDefaults;
use crate::rescission::RescissionPolicy;
use crate::schedule::ScheduleConfig;

/// Configuration shared by the calculators and the runner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub schedule: ScheduleConfig,
    pub rescission: RescissionPolicy,
    pub defaults: FieldDefaults,
}

impl CalculatorConfig {
    /// Load and validate a JSON config file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config = Self::from_reader(BufReader::new(file))?;
        log::info!("Loaded calculator config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load and validate JSON config from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the calculators cannot use meaningfully
    pub fn validate(&self) -> Result<()> {
        if self.schedule.horizon == 0 {
            return Err(DashboardError::InvalidConfig("schedule.horizon must be at least 1".into()));
        }
        if !self.schedule.monthly_rate.is_finite() || self.schedule.monthly_rate < 0.0 {
            return Err(DashboardError::InvalidConfig(format!(
                "schedule.monthly_rate must be a non-negative number, got {}",
                self.schedule.monthly_rate
            )));
        }
        if !self.rescission.early_multiplier.is_finite() || !self.rescission.late_multiplier.is_finite() {
            return Err(DashboardError::InvalidConfig("rescission multipliers must be finite".into()));
        }

        let amounts = [
            ("defaults.financed_amount", self.defaults.financed_amount),
            ("defaults.installment_amount", self.defaults.installment_amount),
            ("defaults.rent_amount", self.defaults.rent_amount),
        ];
        if let Some((name, value)) = amounts.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DashboardError::InvalidConfig(format!("{} must be finite, got {}", name, value)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::NegativeAmortization;
    use std::io::Cursor;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CalculatorConfig::from_reader(Cursor::new("{}")).unwrap();
        assert_eq!(config, CalculatorConfig::default());
        assert_eq!(config.schedule.horizon, 12);
        assert_eq!(config.schedule.monthly_rate, 0.007);
        assert_eq!(config.rescission.early_multiplier, 3.0);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"schedule": {"horizon": 24, "negative_amortization": "clamp_principal"},
                       "defaults": {"rent_amount": 1200.0}}"#;
        let config = CalculatorConfig::from_reader(Cursor::new(json)).unwrap();

        assert_eq!(config.schedule.horizon, 24);
        assert_eq!(config.schedule.monthly_rate, 0.007);
        assert_eq!(config.schedule.negative_amortization, NegativeAmortization::ClampPrincipal);
        assert_eq!(config.defaults.rent_amount, 1200.0);
        assert_eq!(config.defaults.lease_months, 12);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = CalculatorConfig::from_reader(Cursor::new(r#"{"schedule": {"horizon": 0}}"#));
        assert!(matches!(result, Err(DashboardError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = CalculatorConfig::from_reader(Cursor::new(r#"{"schedule": {"monthly_rate": -0.01}}"#));
        assert!(matches!(result, Err(DashboardError::InvalidConfig(_))));
    }
}
