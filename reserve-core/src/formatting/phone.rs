//! US phone number mask.

use super::common::take_digits;

/// Number of digits in a complete phone number.
pub const PHONE_DIGITS: usize = 10;

/// Formats raw phone input as it is typed.
///
/// Non-digits are dropped and at most ten digits are kept. One to three
/// digits are shown bare; from the fourth digit on the area code is wrapped
/// in parentheses, and from the seventh digit on the line number is split off
/// with a hyphen.
///
/// # Examples
///
/// ```
/// use reserve_core::formatting::format_phone;
///
/// assert_eq!(format_phone("12"), "12");
/// assert_eq!(format_phone("1234"), "(123) 4");
/// assert_eq!(format_phone("1234567890"), "(123) 456-7890");
/// ```
pub fn format_phone(raw: &str) -> String {
    let digits = take_digits(raw, PHONE_DIGITS);

    let (area, rest) = digits.split_at(digits.len().min(3));
    let (exchange, line) = rest.split_at(rest.len().min(3));

    if exchange.is_empty() {
        return area.to_string();
    }

    let mut formatted = format!("({area}) {exchange}");
    if !line.is_empty() {
        formatted.push('-');
        formatted.push_str(line);
    }
    formatted
}
