use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::FormField;

/// A submit-time validation failure. The `Display` text is the message shown
/// next to the failing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please enter a valid email address.")]
    InvalidEmailShape,

    #[error("Phone number must be 10 digits.")]
    IncompletePhoneDigits,

    #[error("Spidr PIN must be exactly 16 digits.")]
    IncompletePinDigits,
}

impl FieldError {
    /// The input this error belongs to.
    pub fn field(&self) -> FormField {
        match self {
            Self::InvalidEmailShape => FormField::Email,
            Self::IncompletePhoneDigits => FormField::Phone,
            Self::IncompletePinDigits => FormField::Pin,
        }
    }
}

/// Failing fields of the last submit attempt, keyed by field.
///
/// A field is present only while it fails its rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    errors: BTreeMap<FormField, FieldError>,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` under its own field, replacing any previous entry.
    pub fn insert(
        &mut self,
        error: FieldError,
    ) {
        self.errors.insert(error.field(), error);
    }

    pub fn get(
        &self,
        field: FormField,
    ) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// The user-facing message for `field`, if it is failing.
    pub fn message(
        &self,
        field: FormField,
    ) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn contains(
        &self,
        field: FormField,
    ) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    /// The messages in form order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.values().map(ToString::to_string).collect()
    }
}

impl FromIterator<FieldError> for ErrorState {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut state = Self::new();
        for error in iter {
            state.insert(error);
        }
        state
    }
}

impl fmt::Display for ErrorState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field.as_str(), error)?;
        }
        Ok(())
    }
}
