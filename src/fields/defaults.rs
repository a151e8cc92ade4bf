//! Fallback values for missing or malformed extracted fields

use serde::{Deserialize, Serialize};

use super::money::{parse_brl_amount, parse_leading_int};

pub const DEFAULT_FINANCED_AMOUNT: f64 = 350_000.0;
pub const DEFAULT_INSTALLMENT_AMOUNT: f64 = 2_450.0;
pub const DEFAULT_INSTALLMENT_COUNT: i64 = 360;
pub const DEFAULT_RENT_AMOUNT: f64 = 1_500.0;
pub const DEFAULT_LEASE_MONTHS: i64 = 12;

/// Values substituted when a field is absent or cannot be parsed
///
/// Substitution is silent: callers that need to know whether a value was
/// extracted must compare against these values themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub financed_amount: f64,
    pub installment_amount: f64,
    pub installment_count: i64,
    pub rent_amount: f64,
    pub lease_months: i64,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            financed_amount: DEFAULT_FINANCED_AMOUNT,
            installment_amount: DEFAULT_INSTALLMENT_AMOUNT,
            installment_count: DEFAULT_INSTALLMENT_COUNT,
            rent_amount: DEFAULT_RENT_AMOUNT,
            lease_months: DEFAULT_LEASE_MONTHS,
        }
    }
}

/// Resolve a monetary field, substituting `default` when absent or unparseable
pub fn resolve_amount(field: &str, raw: Option<&str>, default: f64) -> f64 {
    match raw.and_then(parse_brl_amount) {
        Some(value) => value,
        None => {
            log::debug!("{}: using default {:.2} for {:?}", field, default, raw);
            default
        }
    }
}

/// Resolve an integer field, substituting `default` when absent or unparseable
pub fn resolve_count(field: &str, raw: Option<&str>, default: i64) -> i64 {
    match raw.and_then(parse_leading_int) {
        Some(value) => value,
        None => {
            log::debug!("{}: using default {} for {:?}", field, default, raw);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let defaults = FieldDefaults::default();
        assert_eq!(defaults.financed_amount, 350_000.0);
        assert_eq!(defaults.installment_amount, 2_450.0);
        assert_eq!(defaults.installment_count, 360);
        assert_eq!(defaults.rent_amount, 1_500.0);
        assert_eq!(defaults.lease_months, 12);
    }

    #[test]
    fn test_resolve_falls_back() {
        assert_eq!(resolve_amount("valor_aluguel", None, 1_500.0), 1_500.0);
        assert_eq!(resolve_amount("valor_aluguel", Some("n/a"), 1_500.0), 1_500.0);
        assert_eq!(resolve_amount("valor_aluguel", Some("R$ 2.000,00"), 1_500.0), 2_000.0);

        assert_eq!(resolve_count("prazo_locacao", None, 12), 12);
        assert_eq!(resolve_count("prazo_locacao", Some("trinta"), 12), 12);
        assert_eq!(resolve_count("prazo_locacao", Some("30 meses"), 12), 30);
    }

    #[test]
    fn test_zero_is_a_real_value() {
        assert_eq!(resolve_count("numero_parcelas", Some("0"), 360), 0);
        assert_eq!(resolve_amount("valor_parcela", Some("R$ 0,00"), 2_450.0), 0.0);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let defaults: FieldDefaults = serde_json::from_str(r#"{"rent_amount": 900.0}"#).unwrap();
        assert_eq!(defaults.rent_amount, 900.0);
        assert_eq!(defaults.lease_months, 12);
        assert_eq!(defaults.financed_amount, 350_000.0);
    }
}
