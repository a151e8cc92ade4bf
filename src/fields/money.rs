//! Parsing of the raw text values produced by contract extraction
//!
//! Monetary values arrive in Brazilian format (`R$ 350.000,00`): `R$`
//! prefix, `.` as thousands separator and `,` as decimal separator. This is
//! the only place those format assumptions live.

/// Currency symbol stripped before parsing
pub const CURRENCY_SYMBOL: &str = "R$";

/// Parse a BRL-formatted monetary string into a number
///
/// Removes every `R$`, every whitespace character and every `.`, then turns
/// the `,` decimal separator into `.`. Returns `None` when the remainder is
/// empty, not a number, or not finite.
///
/// ```
/// use contract_dashboard::fields::parse_brl_amount;
///
/// assert_eq!(parse_brl_amount("R$ 350.000,00"), Some(350_000.0));
/// assert_eq!(parse_brl_amount("abc"), None);
/// ```
pub fn parse_brl_amount(raw: &str) -> Option<f64> {
    let normalized: String = raw
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return None;
    }

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse the leading integer of a string (`"12 meses"` -> 12)
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit. Returns `None` when no digit follows, or on overflow.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
