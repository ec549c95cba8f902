use serde::{Deserialize, Serialize};

/// The six inputs of the reservation form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Phone,
    Email,
    Guess,
    Pin,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Phone,
        Self::Email,
        Self::Guess,
        Self::Pin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Guess => "guess",
            Self::Pin => "pin",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Phone => "Phone Number",
            Self::Email => "Email Address",
            Self::Guess => "0.00",
            Self::Pin => "Spidr PIN ####-####-####-####",
        }
    }

    /// Decoration rendered in front of the input, if any.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::Guess => Some("$"),
            _ => None,
        }
    }

    /// Whether submit-time validation has a rule for this field.
    pub fn is_validated(&self) -> bool {
        matches!(self, Self::Phone | Self::Email | Self::Pin)
    }
}
