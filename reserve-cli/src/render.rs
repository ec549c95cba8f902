//! Text rendering of the form for the terminal front end.

use std::fmt;

use reserve_core::{FORM_TITLE, FormController, FormField};

const LABEL_WIDTH: usize = 15;

fn label(field: FormField) -> &'static str {
    match field {
        FormField::FirstName => "First name",
        FormField::LastName => "Last name",
        FormField::Phone => "Phone",
        FormField::Email => "Email",
        FormField::Guess => "Guess",
        FormField::Pin => "Spidr PIN",
    }
}

/// The prompt shown when asking for `field`, with its current value.
pub fn prompt(
    field: FormField,
    current: &str,
) -> String {
    if current.is_empty() {
        format!("{}: ", field.placeholder())
    } else {
        format!("{} [{}]: ", field.placeholder(), current)
    }
}

/// Display adapter for the whole form: the title, each field with its
/// value (or placeholder), the error message under every failing field, and
/// the success banner while shown. Fields with a submit-time rule carry a `*`.
pub struct FormView<'a>(pub &'a FormController);

impl fmt::Display for FormView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let controller = self.0;
        writeln!(f, "{FORM_TITLE}")?;

        for field in FormField::ALL {
            let marker = if field.is_validated() { "*" } else { "" };
            let value = controller.value(field);
            let shown = if value.is_empty() {
                format!("({})", field.placeholder())
            } else {
                value.to_string()
            };
            writeln!(
                f,
                "  {:<width$} {}{}",
                format!("{}{marker}:", label(field)),
                field.prefix().unwrap_or(""),
                shown,
                width = LABEL_WIDTH
            )?;
            if let Some(message) = controller.errors().message(field) {
                writeln!(f, "  {:<width$} {}", "", message, width = LABEL_WIDTH)?;
            }
        }

        if let Some(banner) = controller.banner() {
            writeln!(f, "{banner}")?;
        }
        Ok(())
    }
}

/// Renders the form as text. See [`FormView`].
pub fn render_form(controller: &FormController) -> String {
    FormView(controller).to_string()
}
