//! Small shared helpers for field normalization

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Strips every non-digit character, e.g. `"09/02"` -> `"0902"`
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Truncates to at most `max` characters; shorter strings pass through
pub fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Converts a major-unit decimal amount into the minor-unit string the
/// gateway expects: the two-decimal rendering with the separator removed
/// (`"49.95"` -> `"4995"`, `"5"` -> `"500"`, `"0.29"` -> `"029"`).
///
/// Returns `None` for absent or unparseable input; the caller omits the
/// amount field in that case.
pub fn to_minor_unit_string(amount: &str) -> Option<String> {
    let value = Decimal::from_str(amount).ok()?;
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Some(format!("{rounded:.2}").replace('.', ""))
}
