use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use yen_core::EmploymentType;
use yen_core::calculations::common::group_thousands;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,200"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses an employment type code for the command line.
pub fn parse_employment_type(s: &str) -> Result<EmploymentType, String> {
    EmploymentType::parse(s).ok_or_else(|| {
        let codes: Vec<_> = EmploymentType::all().iter().map(|t| t.as_str()).collect();
        format!("unknown employment type '{s}' (expected one of: {})", codes.join(", "))
    })
}

/// Formats whole yen as `¥1,234,567`. Fractional yen are floored.
pub fn format_yen(amount: Decimal) -> String {
    let whole = amount.floor();
    if whole.is_sign_negative() && !whole.is_zero() {
        format!("-¥{}", group_thousands(whole.abs()))
    } else {
        format!("¥{}", group_thousands(whole.abs()))
    }
}

/// Formats a fraction as a percentage with one decimal, e.g. `28.2%`.
pub fn format_rate(rate: Decimal) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{pct:.1}%")
}
