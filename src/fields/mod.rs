//! Field parsing and default substitution shared by both calculators

mod money;
mod defaults;

pub use money::{parse_brl_amount, parse_leading_int, CURRENCY_SYMBOL};
pub use defaults::{
    FieldDefaults, resolve_amount, resolve_count,
    DEFAULT_FINANCED_AMOUNT, DEFAULT_INSTALLMENT_AMOUNT, DEFAULT_INSTALLMENT_COUNT,
    DEFAULT_RENT_AMOUNT, DEFAULT_LEASE_MONTHS,
};
