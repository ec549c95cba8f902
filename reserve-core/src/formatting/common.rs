//! Helpers shared by the field formatters and the validator.

/// Returns the ASCII digits of `value`, in order, keeping at most `max` of them.
///
/// # Examples
///
/// ```
/// use reserve_core::formatting::common::take_digits;
///
/// assert_eq!(take_digits("(555) 123-4567", 10), "5551234567");
/// assert_eq!(take_digits("12ab34", 3), "123");
/// assert_eq!(take_digits("no digits", 10), "");
/// ```
pub fn take_digits(
    value: &str,
    max: usize,
) -> String {
    value.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Counts the ASCII digits in `value`, ignoring every other character.
///
/// # Examples
///
/// ```
/// use reserve_core::formatting::common::digit_count;
///
/// assert_eq!(digit_count("(555) 123-4567"), 10);
/// assert_eq!(digit_count("1234-5678-"), 8);
/// ```
pub fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

/// Inserts a comma every three digits, counting from the right.
///
/// `digits` must contain ASCII digits only.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
