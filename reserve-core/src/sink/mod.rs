pub mod factory;
pub mod log;

pub use factory::{SinkConfig, SinkFactory, SinkRegistry};
pub use log::{LogSink, LogSinkFactory};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::FormState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("Sink unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Destination for validated submissions.
///
/// A sink receives the form exactly as it stood when it passed validation,
/// before the controller resets it.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(
        &self,
        form: &FormState,
    ) -> Result<(), SinkError>;
}
