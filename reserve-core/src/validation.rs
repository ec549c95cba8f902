//! Submit-time validation rules.
//!
//! Only phone, email and PIN carry a rule. Names and the guess are accepted
//! as typed, including when empty.

use std::sync::LazyLock;

use regex::Regex;

use crate::formatting::common::digit_count;
use crate::formatting::{PHONE_DIGITS, PIN_DIGITS};
use crate::models::{ErrorState, FieldError, FormState};

/// Structural shape check: `local@domain.tld` with no whitespace and a single
/// `@`. Not RFC 5322 validation.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Returns the errors for every failing field of `form`.
///
/// The form is valid iff the returned state is empty.
pub fn validate(form: &FormState) -> ErrorState {
    let mut errors = ErrorState::new();

    if !is_valid_email(&form.email) {
        errors.insert(FieldError::InvalidEmailShape);
    }

    if digit_count(&form.phone) != PHONE_DIGITS {
        errors.insert(FieldError::IncompletePhoneDigits);
    }

    if digit_count(&form.pin) != PIN_DIGITS {
        errors.insert(FieldError::IncompletePinDigits);
    }

    errors
}
