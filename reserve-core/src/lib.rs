pub mod controller;
pub mod formatting;
pub mod models;
pub mod sink;
pub mod validation;

pub use controller::{
    DEFAULT_BANNER_DURATION, FORM_TITLE, FormController, SUCCESS_MESSAGE, SubmitOutcome,
};
pub use models::*;
pub use sink::{SinkError, SubmissionSink};
