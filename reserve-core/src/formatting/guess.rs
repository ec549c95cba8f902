//! Dollar-amount grouping for the guess field.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use super::common::group_thousands;

const DECIMAL_PLACES: usize = 2;

/// Error returned when a guess cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid guess '{input}': {source}")]
pub struct ParseGuessError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Formats raw guess input as it is typed.
///
/// Only digits and `.` are kept. Leading zeros of the integer part are
/// stripped (a lone `0` survives), the integer part is grouped with commas,
/// and at most two decimal digits are kept. A trailing `.` is preserved so the
/// user can keep typing decimals.
///
/// Returns `None` when the input holds more than one decimal point; the
/// caller keeps the previous value in that case.
///
/// # Examples
///
/// ```
/// use reserve_core::formatting::format_guess;
///
/// assert_eq!(format_guess("01234.567").as_deref(), Some("1,234.56"));
/// assert_eq!(format_guess("12.").as_deref(), Some("12."));
/// assert_eq!(format_guess("1.2.3"), None);
/// ```
pub fn format_guess(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = cleaned.split('.');
    let int_part = parts.next().unwrap_or_default();
    let decimal_part = parts.next();
    if parts.next().is_some() {
        debug!(input = %raw, "guess rejected: more than one decimal point");
        return None;
    }

    let mut formatted = group_thousands(strip_leading_zeros(int_part));
    if let Some(decimals) = decimal_part {
        formatted.push('.');
        formatted.extend(decimals.chars().take(DECIMAL_PLACES));
    }
    Some(formatted)
}

/// Strips zeros that are followed by another digit, so `"007"` becomes
/// `"7"` and `"000"` becomes `"0"`.
fn strip_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        &digits[digits.len() - 1..]
    } else {
        trimmed
    }
}

/// Parses a formatted guess into a [`Decimal`].
///
/// Commas are treated as thousands separators and surrounding whitespace is
/// ignored. A bare trailing or leading `.` is accepted (`"12."`, `".5"`).
/// Returns `None` for an empty guess.
pub fn parse_guess(s: &str) -> Result<Option<Decimal>, ParseGuessError> {
    let normalized = s.trim().replace(',', "");
    let normalized = normalized.trim_end_matches('.');
    if normalized.is_empty() {
        return Ok(None);
    }

    let normalized = if normalized.starts_with('.') {
        format!("0{normalized}")
    } else {
        normalized.to_string()
    };

    normalized.parse().map(Some).map_err(|e| {
        tracing::warn!(input = %s, "invalid guess: {}", e);
        ParseGuessError {
            input: s.to_string(),
            source: e,
        }
    })
}
