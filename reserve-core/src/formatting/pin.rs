//! Spidr PIN grouping.

use super::common::take_digits;

/// Number of digits in a complete PIN.
pub const PIN_DIGITS: usize = 16;

const GROUP_LEN: usize = 4;

/// Four groups of four digits plus three separators.
const PIN_DISPLAY_LEN: usize = PIN_DIGITS + PIN_DIGITS / GROUP_LEN - 1;

/// Formats raw PIN input as it is typed.
///
/// Keeps at most sixteen digits and appends a `-` after every complete group
/// of four, so a partially typed PIN ends with a separator once a group is
/// complete (`"1234-"`). The result is capped at nineteen characters, which
/// drops the separator that would follow the sixteenth digit.
///
/// # Examples
///
/// ```
/// use reserve_core::formatting::format_pin;
///
/// assert_eq!(format_pin("12345"), "1234-5");
/// assert_eq!(format_pin("1234567812345678"), "1234-5678-1234-5678");
/// ```
pub fn format_pin(raw: &str) -> String {
    let digits = take_digits(raw, PIN_DIGITS);

    let mut grouped = String::with_capacity(PIN_DIGITS + PIN_DIGITS / GROUP_LEN);
    for (i, ch) in digits.chars().enumerate() {
        grouped.push(ch);
        if (i + 1) % GROUP_LEN == 0 {
            grouped.push('-');
        }
    }
    grouped.truncate(PIN_DISPLAY_LEN);
    grouped
}
