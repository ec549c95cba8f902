use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FormField;
use crate::formatting::{ParseGuessError, parse_guess};

/// Current display values of the reservation form.
///
/// Every field holds the string shown in its input. Masked fields (phone,
/// guess, pin) hold their formatted representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub guess: String,
    pub pin: String,
}

impl FormState {
    pub fn get(
        &self,
        field: FormField,
    ) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::Guess => &self.guess,
            FormField::Pin => &self.pin,
        }
    }

    pub fn set(
        &mut self,
        field: FormField,
        value: String,
    ) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Phone => &mut self.phone,
            FormField::Email => &mut self.email,
            FormField::Guess => &mut self.guess,
            FormField::Pin => &mut self.pin,
        };
        *slot = value;
    }

    /// Returns `true` when every field is empty.
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Resets every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The guess as a dollar amount, or `None` when nothing was entered.
    pub fn guess_amount(&self) -> Result<Option<Decimal>, ParseGuessError> {
        parse_guess(&self.guess)
    }

    /// The PIN with every digit but the last four replaced by `*`.
    pub fn masked_pin(&self) -> String {
        let total = self.pin.chars().filter(char::is_ascii_digit).count();
        let visible_from = total.saturating_sub(4);
        let mut seen = 0;
        self.pin
            .chars()
            .map(|c| {
                if !c.is_ascii_digit() {
                    return c;
                }
                seen += 1;
                if seen > visible_from { c } else { '*' }
            })
            .collect()
    }
}

impl fmt::Display for FormState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "First name: {}", self.first_name)?;
        writeln!(f, "Last name:  {}", self.last_name)?;
        writeln!(f, "Phone:      {}", self.phone)?;
        writeln!(f, "Email:      {}", self.email)?;
        writeln!(f, "Guess:      ${}", self.guess)?;
        write!(f, "Spidr PIN:  {}", self.masked_pin())
    }
}
