//! The `csv` sink: one appended row per submission.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Local;
use reserve_core::sink::{SinkConfig, SinkFactory};
use reserve_core::{FormState, SinkError, SubmissionSink};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SubmissionRow<'a> {
    first_name: &'a str,
    last_name: &'a str,
    phone: &'a str,
    email: &'a str,
    guess: &'a str,
    pin: &'a str,
    submitted_at: String,
}

impl<'a> SubmissionRow<'a> {
    fn new(form: &'a FormState) -> Self {
        Self {
            first_name: &form.first_name,
            last_name: &form.last_name,
            phone: &form.phone,
            email: &form.email,
            guess: &form.guess,
            pin: &form.pin,
            submitted_at: Local::now().to_rfc3339(),
        }
    }
}

/// Appends submissions to a CSV file.
///
/// The header row is written only when the file is new or empty, so a file
/// can be reopened across runs.
pub struct CsvSink {
    path: PathBuf,
    writer: Mutex<csv::Writer<File>>,
}

impl CsvSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SinkError::Io(format!("cannot open '{}': {e}", path.display())))?;
        let is_empty = file
            .metadata()
            .map_err(|e| SinkError::Io(e.to_string()))?
            .len()
            == 0;

        let writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubmissionSink for CsvSink {
    async fn deliver(
        &self,
        form: &FormState,
    ) -> Result<(), SinkError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SinkError::Unavailable("csv writer lock poisoned".to_string()))?;
        writer
            .serialize(SubmissionRow::new(form))
            .map_err(|e| SinkError::Io(e.to_string()))?;
        writer.flush().map_err(|e| SinkError::Io(e.to_string()))?;
        debug!(path = %self.path.display(), "submission appended");
        Ok(())
    }
}

/// [`SinkFactory`] for the `"csv"` backend. The config target is the output
/// file path.
pub struct CsvSinkFactory;

#[async_trait]
impl SinkFactory for CsvSinkFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    async fn create(
        &self,
        config: &SinkConfig,
    ) -> Result<Box<dyn SubmissionSink>, SinkError> {
        if config.target.trim().is_empty() {
            return Err(SinkError::Configuration(
                "csv sink requires an output path".to_string(),
            ));
        }
        let sink = CsvSink::open(config.target.trim())?;
        debug!(path = %sink.path().display(), "csv sink opened");
        Ok(Box::new(sink))
    }
}
