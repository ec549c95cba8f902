//! Wiring between settings, sinks and the terminal front end.

use std::io::Write;

use anyhow::{Context, Result, bail};
use reserve_core::sink::{LogSinkFactory, SinkRegistry};
use reserve_core::{FormController, FormField, SubmitOutcome};
use reserve_data::CsvSinkFactory;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::render::{prompt, render_form};
use crate::settings::Settings;

/// Registry with every sink backend this binary ships.
pub fn build_registry() -> SinkRegistry {
    let mut registry = SinkRegistry::new();
    registry.register(Box::new(LogSinkFactory));
    registry.register(Box::new(CsvSinkFactory));
    registry
}

/// Creates the configured sink and a controller that delivers to it.
pub async fn build_controller(settings: &Settings) -> Result<FormController> {
    debug!(backend = %settings.sink.backend, "creating sink");
    let sink = build_registry()
        .create(&settings.sink)
        .await
        .with_context(|| format!("Failed to create '{}' sink", settings.sink.backend))?;

    Ok(FormController::new(sink).with_banner_duration(settings.banner_duration()))
}

/// Applies each value to its field as one change event and submits once.
///
/// # Errors
/// Fails without submitting when a formatter rejects a value, e.g. a guess
/// with two decimal points, or when the sink cannot deliver.
pub async fn submit_values(
    controller: &mut FormController,
    values: &[(FormField, String)],
) -> Result<SubmitOutcome> {
    for (field, value) in values {
        if !controller.handle_change(*field, value) {
            bail!("{} value '{}' was rejected", field.as_str(), value);
        }
    }
    controller
        .submit()
        .await
        .context("Failed to deliver the submission")
}

/// Waits until the success banner has been hidden. Returns at once when it
/// is not showing.
pub async fn wait_for_banner(controller: &FormController) {
    let mut submitted = controller.subscribe();
    while *submitted.borrow_and_update() {
        if submitted.changed().await.is_err() {
            break;
        }
    }
}

/// Answer that clears a field back to empty.
pub const CLEAR_TOKEN: &str = "-";

/// Prompts for every field on `input`, submits, and repeats until `input`
/// is exhausted.
///
/// An empty answer keeps the current value, so input that failed
/// validation only needs its failing fields corrected. [`CLEAR_TOKEN`]
/// empties the field.
pub async fn run_interactive<R, W>(
    controller: &mut FormController,
    input: R,
    output: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(
        output,
        "Press Enter to keep a value, '{CLEAR_TOKEN}' to clear it."
    )?;

    loop {
        write!(output, "{}", render_form(controller))?;

        for field in FormField::ALL {
            write!(output, "{}", prompt(field, controller.value(field)))?;
            output.flush()?;

            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                writeln!(output)?;
                info!("input closed");
                return Ok(());
            };
            match line.trim_end_matches('\r') {
                "" => {}
                CLEAR_TOKEN => controller.retype(field, ""),
                answer => controller.retype(field, answer),
            }
        }

        match controller.submit().await {
            Ok(SubmitOutcome::Submitted) => {}
            Ok(SubmitOutcome::Rejected(errors)) => {
                writeln!(output, "Please correct {} field(s).", errors.len())?;
            }
            Err(e) => writeln!(output, "Submission failed: {e}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use reserve_core::{FormState, SinkError, SubmissionSink};
    use tokio::time::Instant;

    use super::*;

    #[derive(Clone, Default)]
    struct CollectingSink(Arc<Mutex<Vec<FormState>>>);

    #[async_trait]
    impl SubmissionSink for CollectingSink {
        async fn deliver(
            &self,
            form: &FormState,
        ) -> Result<(), SinkError> {
            self.0.lock().unwrap().push(form.clone());
            Ok(())
        }
    }

    fn controller() -> (FormController, CollectingSink) {
        let sink = CollectingSink::default();
        (FormController::new(Box::new(sink.clone())), sink)
    }

    #[test]
    fn registry_ships_log_and_csv() {
        assert_eq!(build_registry().available_backends(), vec!["csv", "log"]);
    }

    #[tokio::test]
    async fn build_controller_uses_configured_banner_duration() {
        let settings = Settings {
            banner_duration_ms: 1200,
            ..Default::default()
        };
        let controller = build_controller(&settings).await.unwrap();
        assert_eq!(controller.banner_duration(), Duration::from_millis(1200));
    }

    #[tokio::test]
    async fn build_controller_rejects_unknown_sink() {
        let mut settings = Settings::default();
        settings.sink.backend = "carrier-pigeon".to_string();

        let err = match build_controller(&settings).await {
            Ok(_) => panic!("unknown sink should fail"),
            Err(e) => e,
        };
        assert!(format!("{err:#}").contains("carrier-pigeon"));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_values_formats_and_delivers() {
        let (mut controller, sink) = controller();
        let values = vec![
            (FormField::FirstName, "Ada".to_string()),
            (FormField::Phone, "555-123-4567".to_string()),
            (FormField::Email, "ada@example.com".to_string()),
            (FormField::Guess, "0042.10".to_string()),
            (FormField::Pin, "1234 5678 1234 5678".to_string()),
        ];

        let outcome = submit_values(&mut controller, &values).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Submitted);
        let delivered = sink.0.lock().unwrap();
        assert_eq!(delivered[0].phone, "(555) 123-4567");
        assert_eq!(delivered[0].guess, "42.10");
        assert_eq!(delivered[0].pin, "1234-5678-1234-5678");
    }

    #[tokio::test]
    async fn submit_values_rejects_a_guess_with_two_points() {
        let (mut controller, sink) = controller();
        let values = vec![
            (FormField::Phone, "5551234567".to_string()),
            (FormField::Email, "a@b.co".to_string()),
            (FormField::Guess, "1.2.3".to_string()),
            (FormField::Pin, "1234567812345678".to_string()),
        ];

        let err = submit_values(&mut controller, &values).await.unwrap_err();

        assert_eq!(err.to_string(), "guess value '1.2.3' was rejected");
        assert_eq!(controller.value(FormField::Guess), "");
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_banner_returns_after_the_window() {
        let (mut controller, _) = controller();
        let values = vec![
            (FormField::Phone, "5551234567".to_string()),
            (FormField::Email, "a@b.co".to_string()),
            (FormField::Pin, "1234567812345678".to_string()),
        ];
        submit_values(&mut controller, &values).await.unwrap();
        let start = Instant::now();

        wait_for_banner(&controller).await;

        assert!(start.elapsed() >= Duration::from_millis(3000));
        assert!(!controller.is_submitted());
    }

    #[tokio::test]
    async fn wait_for_banner_is_immediate_when_hidden() {
        let (controller, _) = controller();
        wait_for_banner(&controller).await;
    }

    #[tokio::test(start_paused = true)]
    async fn interactive_session_keeps_input_until_corrected() {
        let (mut controller, sink) = controller();
        let input = "\
Ada
Lovelace
555
ada@example.com
100
1234567812345678


5551234567



";
        let mut output = Vec::new();

        run_interactive(&mut controller, input.as_bytes(), &mut output)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Phone number must be 10 digits."));
        assert!(output.contains("Please correct 1 field(s)."));
        assert!(output.contains("Phone Number [555]: "));
        assert!(output.contains("Form submitted successfully!"));

        let delivered = sink.0.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].first_name, "Ada");
        assert_eq!(delivered[0].phone, "(555) 123-4567");
        assert_eq!(delivered[0].guess, "100");
    }

    #[tokio::test(start_paused = true)]
    async fn clear_token_empties_a_field() {
        let (mut controller, sink) = controller();
        let input = "\
Ada
Lovelase
555
ada@example.com
12
1234567812345678

-
5551234567



";
        let mut output = Vec::new();

        run_interactive(&mut controller, input.as_bytes(), &mut output)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Press Enter to keep a value, '-' to clear it.\n"));
        assert!(output.contains("Last Name [Lovelase]: "));

        let delivered = sink.0.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].first_name, "Ada");
        assert_eq!(delivered[0].last_name, "");
        assert_eq!(delivered[0].phone, "(555) 123-4567");
    }
}
