//! The `log` sink: submissions are written to the tracing output.

use async_trait::async_trait;
use tracing::info;

use super::{SinkConfig, SinkError, SinkFactory, SubmissionSink};
use crate::models::FormState;

/// Emits each submission as a structured INFO event. The PIN is masked.
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn deliver(
        &self,
        form: &FormState,
    ) -> Result<(), SinkError> {
        let guess_amount = form.guess_amount().ok().flatten();
        info!(
            first_name = %form.first_name,
            last_name = %form.last_name,
            phone = %form.phone,
            email = %form.email,
            guess = %form.guess,
            guess_amount = ?guess_amount,
            pin = %form.masked_pin(),
            "submitted form data"
        );
        Ok(())
    }
}

/// [`SinkFactory`] for the `"log"` backend. The config target is ignored.
pub struct LogSinkFactory;

#[async_trait]
impl SinkFactory for LogSinkFactory {
    fn backend_name(&self) -> &'static str {
        "log"
    }

    async fn create(
        &self,
        _config: &SinkConfig,
    ) -> Result<Box<dyn SubmissionSink>, SinkError> {
        Ok(Box::new(LogSink))
    }
}
