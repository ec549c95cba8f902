//! Keystroke formatters.
//!
//! Each formatter takes the raw value of an input after a change event and
//! returns the canonical display string to store in the form.

pub mod common;
pub mod guess;
pub mod phone;
pub mod pin;

pub use guess::{ParseGuessError, format_guess, parse_guess};
pub use phone::{PHONE_DIGITS, format_phone};
pub use pin::{PIN_DIGITS, format_pin};

use crate::models::FormField;

/// Formats `raw` for `field`.
///
/// Returns `None` when the change must be ignored and the field keep its
/// previous value. Fields without a mask pass through unchanged.
pub fn apply(
    field: FormField,
    raw: &str,
) -> Option<String> {
    match field {
        FormField::Phone => Some(format_phone(raw)),
        FormField::Pin => Some(format_pin(raw)),
        FormField::Guess => format_guess(raw),
        FormField::FirstName | FormField::LastName | FormField::Email => Some(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unmasked_fields_pass_through() {
        assert_eq!(
            apply(FormField::FirstName, "  Ada 1 ").as_deref(),
            Some("  Ada 1 ")
        );
        assert_eq!(
            apply(FormField::Email, "not an email").as_deref(),
            Some("not an email")
        );
    }

    #[test]
    fn masked_fields_are_formatted() {
        assert_eq!(
            apply(FormField::Phone, "5551234567").as_deref(),
            Some("(555) 123-4567")
        );
        assert_eq!(apply(FormField::Pin, "12345").as_deref(), Some("1234-5"));
        assert_eq!(apply(FormField::Guess, "2500").as_deref(), Some("2,500"));
    }

    #[test]
    fn rejected_guess_is_none() {
        assert_eq!(apply(FormField::Guess, "1.2.3"), None);
    }
}
