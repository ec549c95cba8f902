//! Replays recorded form entries through the form controller.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Every
//! column is optional; a missing column or an empty cell is typed as an
//! empty value.
//!
//! | Column       | Field     |
//! |--------------|-----------|
//! | `first_name` | firstName |
//! | `last_name`  | lastName  |
//! | `phone`      | phone     |
//! | `email`      | email     |
//! | `guess`      | guess     |
//! | `pin`        | pin       |
//!
//! Values are typed as raw keystrokes, so `5551234567` and `(555) 123-4567`
//! both end up as `(555) 123-4567`.
//!
//! ```csv
//! first_name,last_name,phone,email,guess,pin
//! Ada,Lovelace,5551234567,ada@example.com,1234.50,1234567812345678
//! ```

use std::fmt;
use std::io::Read;

use reserve_core::{ErrorState, FormController, FormField, SinkError, SubmitOutcome};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading or replaying entries.
#[derive(Debug, Error)]
pub enum EntryLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Row {row}: submission failed: {source}")]
    Sink {
        row: usize,
        #[source]
        source: SinkError,
    },
}

impl From<csv::Error> for EntryLoaderError {
    fn from(err: csv::Error) -> Self {
        EntryLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the entries file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EntryRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub guess: String,
    pub pin: String,
}

impl EntryRecord {
    /// The raw values paired with their fields, in form order.
    pub fn values(&self) -> [(FormField, &str); 6] {
        [
            (FormField::FirstName, self.first_name.as_str()),
            (FormField::LastName, self.last_name.as_str()),
            (FormField::Phone, self.phone.as_str()),
            (FormField::Email, self.email.as_str()),
            (FormField::Guess, self.guess.as_str()),
            (FormField::Pin, self.pin.as_str()),
        ]
    }
}

/// A row that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub errors: ErrorState,
}

/// Outcome of a replay run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedEntry>,
}

impl ReplayReport {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected.len()
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} entries: {} submitted, {} rejected",
            self.total(),
            self.accepted,
            self.rejected.len()
        )?;
        for entry in &self.rejected {
            write!(f, "\n  row {}: {}", entry.row, entry.errors)?;
        }
        Ok(())
    }
}

/// Loader for recorded form entries.
pub struct EntryLoader;

impl EntryLoader {
    /// Parse entry records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<EntryRecord>, EntryLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: EntryRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Types each record into `controller` and submits it.
    ///
    /// Every field is cleared and retyped for each row, so values left over
    /// from a rejected row never leak into the next one.
    ///
    /// # Errors
    /// Stops at the first row whose submission the sink fails to deliver.
    pub async fn replay(
        controller: &mut FormController,
        records: &[EntryRecord],
    ) -> Result<ReplayReport, EntryLoaderError> {
        let mut report = ReplayReport::default();

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            for (field, value) in record.values() {
                controller.retype(field, value);
            }

            match controller.submit().await {
                Ok(SubmitOutcome::Submitted) => {
                    debug!(row, "entry submitted");
                    report.accepted += 1;
                }
                Ok(SubmitOutcome::Rejected(errors)) => {
                    debug!(row, errors = %errors, "entry rejected:\n{}", controller.form());
                    report.rejected.push(RejectedEntry { row, errors });
                }
                Err(source) => return Err(EntryLoaderError::Sink { row, source }),
            }
        }

        Ok(report)
    }
}
