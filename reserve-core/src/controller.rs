//! The form controller: field values, validation errors and the success
//! banner flag.
//!
//! Change events run through the keystroke formatters before they are
//! stored. A submit either hands the form to the configured sink and shows
//! the success banner for a fixed window, or records the failing fields and
//! keeps the input for correction.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::formatting;
use crate::models::{ErrorState, FormField, FormState};
use crate::sink::{SinkError, SubmissionSink};
use crate::validation::validate;

pub const FORM_TITLE: &str = "Reserve Your Air Fryer!";
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// How long the success banner stays up after a successful submit.
pub const DEFAULT_BANNER_DURATION: Duration = Duration::from_millis(3000);

/// Result of a submit attempt that reached validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was delivered and reset.
    Submitted,
    /// Validation failed; the form is unchanged.
    Rejected(ErrorState),
}

pub struct FormController {
    form: FormState,
    errors: ErrorState,
    sink: Box<dyn SubmissionSink>,
    banner_duration: Duration,
    submitted: Arc<watch::Sender<bool>>,
    pending_revert: Option<JoinHandle<()>>,
}

impl FormController {
    pub fn new(sink: Box<dyn SubmissionSink>) -> Self {
        let (submitted, _) = watch::channel(false);
        Self {
            form: FormState::default(),
            errors: ErrorState::new(),
            sink,
            banner_duration: DEFAULT_BANNER_DURATION,
            submitted: Arc::new(submitted),
            pending_revert: None,
        }
    }

    pub fn with_banner_duration(
        mut self,
        duration: Duration,
    ) -> Self {
        self.banner_duration = duration;
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    pub fn value(
        &self,
        field: FormField,
    ) -> &str {
        self.form.get(field)
    }

    pub fn banner_duration(&self) -> Duration {
        self.banner_duration
    }

    /// `true` while the success banner is showing.
    pub fn is_submitted(&self) -> bool {
        *self.submitted.borrow()
    }

    /// The success banner text while it is showing.
    pub fn banner(&self) -> Option<&'static str> {
        self.is_submitted().then_some(SUCCESS_MESSAGE)
    }

    /// Watches the submitted flag, e.g. to hide a banner when it reverts.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.submitted.subscribe()
    }

    /// Applies a change event: formats `raw` for `field` and stores it.
    ///
    /// Returns `false` when the formatter rejected the change, in which case
    /// the field keeps its previous value.
    pub fn handle_change(
        &mut self,
        field: FormField,
        raw: &str,
    ) -> bool {
        match formatting::apply(field, raw) {
            Some(value) => {
                self.form.set(field, value);
                true
            }
            None => {
                debug!(field = field.as_str(), input = %raw, "change rejected");
                false
            }
        }
    }

    /// Types `text` into `field` one character at a time, running a change
    /// event after each keystroke.
    pub fn type_text(
        &mut self,
        field: FormField,
        text: &str,
    ) {
        for ch in text.chars() {
            let mut next = self.value(field).to_string();
            next.push(ch);
            self.handle_change(field, &next);
        }
    }

    /// Replaces the value of `field` as if the user cleared it and typed
    /// `text`.
    pub fn retype(
        &mut self,
        field: FormField,
        text: &str,
    ) {
        self.form.set(field, String::new());
        self.type_text(field, text);
    }

    /// Validates and submits the form.
    ///
    /// On success the form is handed to the sink, reset, and the banner is
    /// shown for the banner duration. A success inside a running window
    /// restarts the window. On validation failure the errors are stored and
    /// the form is left untouched.
    ///
    /// # Errors
    /// Returns the sink's error when delivery fails. The form is kept and
    /// the banner is not shown.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SinkError> {
        let errors = validate(&self.form);
        if !errors.is_empty() {
            warn!(errors = %errors, "validation failed");
            self.hide_banner();
            self.errors = errors.clone();
            return Ok(SubmitOutcome::Rejected(errors));
        }

        self.errors.clear();
        if let Err(e) = self.sink.deliver(&self.form).await {
            warn!(error = %e, "submission was not delivered");
            self.hide_banner();
            return Err(e);
        }

        info!("form submitted");
        self.form.clear();
        self.show_banner();
        Ok(SubmitOutcome::Submitted)
    }

    fn show_banner(&mut self) {
        self.cancel_pending_revert();
        self.submitted.send_replace(true);

        let submitted = Arc::clone(&self.submitted);
        let duration = self.banner_duration;
        self.pending_revert = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            submitted.send_replace(false);
            debug!("success banner hidden");
        }));
    }

    fn hide_banner(&mut self) {
        self.cancel_pending_revert();
        self.submitted.send_replace(false);
    }

    fn cancel_pending_revert(&mut self) {
        if let Some(handle) = self.pending_revert.take() {
            handle.abort();
        }
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        self.cancel_pending_revert();
    }
}
