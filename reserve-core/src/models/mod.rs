mod error_state;
mod form_field;
mod form_state;

pub use error_state::{ErrorState, FieldError};
pub use form_field::FormField;
pub use form_state::FormState;
