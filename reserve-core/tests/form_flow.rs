//! End-to-end flows through the public controller API: typing into fields,
//! submitting, and watching the success banner.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use reserve_core::formatting::{format_guess, format_phone, format_pin};
use reserve_core::validation::validate;
use reserve_core::{
    FormController, FormField, FormState, SinkError, SubmissionSink, SubmitOutcome,
    SUCCESS_MESSAGE,
};

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

fn fill(
    controller: &mut FormController,
    email: &str,
) {
    controller.type_text(FormField::FirstName, "Grace");
    controller.type_text(FormField::LastName, "Hopper");
    controller.type_text(FormField::Phone, "2125550100");
    controller.type_text(FormField::Email, email);
    controller.type_text(FormField::Guess, "149.99");
    controller.type_text(FormField::Pin, "4444333322221111");
}

#[test]
fn formatter_examples() {
    assert_eq!(format_phone("1234567890"), "(123) 456-7890");
    assert_eq!(format_phone("12"), "12");
    assert_eq!(format_phone("1234"), "(123) 4");
    assert_eq!(format_pin("1234567812345678"), "1234-5678-1234-5678");
    assert_eq!(format_guess("01234.567").as_deref(), Some("1,234.56"));
}

#[test]
fn validator_examples() {
    let bad = FormState {
        email: "bad".to_string(),
        phone: "123".to_string(),
        pin: "1111".to_string(),
        ..Default::default()
    };
    assert_eq!(
        validate(&bad).messages(),
        vec![
            "Phone number must be 10 digits.",
            "Please enter a valid email address.",
            "Spidr PIN must be exactly 16 digits.",
        ]
    );

    let good = FormState {
        email: "a@b.co".to_string(),
        phone: "1234567890".to_string(),
        pin: format_pin("1111111111111111"),
        ..Default::default()
    };
    assert!(validate(&good).is_empty());
}

#[tokio::test(start_paused = true)]
async fn valid_submission_clears_form_and_shows_banner_for_three_seconds() {
    let (mut controller, sink) = controller();
    fill(&mut controller, "grace@navy.mil");

    let outcome = controller.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Submitted);
    for field in FormField::ALL {
        assert_eq!(controller.value(field), "", "{} should be cleared", field.as_str());
    }
    assert!(controller.errors().is_empty());
    assert_eq!(controller.banner(), Some(SUCCESS_MESSAGE));

    let delivered = sink.0.lock().unwrap().clone();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].phone, "(212) 555-0100");
    assert_eq!(delivered[0].guess, "149.99");
    assert_eq!(delivered[0].pin, "4444-3333-2222-1111");

    tokio::time::sleep(Duration::from_millis(3001)).await;
    assert_eq!(controller.banner(), None);
}

#[tokio::test]
async fn invalid_email_shows_only_the_email_error() {
    let (mut controller, sink) = controller();
    fill(&mut controller, "no-at-sign");

    let outcome = controller.submit().await.unwrap();

    let SubmitOutcome::Rejected(errors) = outcome else {
        panic!("expected the submit to be rejected");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.message(FormField::Email).as_deref(),
        Some("Please enter a valid email address.")
    );
    assert_eq!(controller.value(FormField::FirstName), "Grace");
    assert_eq!(controller.value(FormField::LastName), "Hopper");
    assert_eq!(controller.value(FormField::Guess), "149.99");
    assert_eq!(controller.banner(), None);
    assert!(sink.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn correcting_the_failing_field_allows_submission() {
    let (mut controller, sink) = controller();
    fill(&mut controller, "no-at-sign");
    controller.submit().await.unwrap();

    controller.retype(FormField::Email, "grace@navy.mil");
    let outcome = controller.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(sink.0.lock().unwrap()[0].email, "grace@navy.mil");
}
