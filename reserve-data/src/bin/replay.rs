use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reserve_core::FormController;
use reserve_core::sink::{LogSinkFactory, SinkConfig, SinkRegistry};
use reserve_data::{CsvSinkFactory, EntryLoader};
use tracing_subscriber::EnvFilter;

/// Replay recorded reservation entries through the form.
///
/// Each row of the CSV file is typed into the form field by field and
/// submitted. Rows that pass validation are handed to the selected sink;
/// rows that fail are reported with their error messages.
///
/// The CSV file may have any of the following columns:
/// first_name, last_name, phone, email, guess, pin
#[derive(Parser, Debug)]
#[command(name = "reserve-replay")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the entries
    #[arg(short, long)]
    file: PathBuf,

    /// Sink that receives accepted entries (log or csv)
    #[arg(short, long, default_value = "log")]
    sink: String,

    /// Output path for the csv sink
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let mut registry = SinkRegistry::new();
    registry.register(Box::new(LogSinkFactory));
    registry.register(Box::new(CsvSinkFactory));

    let config = SinkConfig {
        backend: args.sink.clone(),
        target: args
            .output
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    let sink = registry
        .create(&config)
        .await
        .with_context(|| format!("Failed to create '{}' sink", args.sink))?;

    println!("Replaying entries from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = EntryLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} entries from CSV", records.len());

    let mut controller = FormController::new(sink);
    let report = EntryLoader::replay(&mut controller, &records)
        .await
        .context("Failed to replay entries")?;

    println!("{report}");

    Ok(())
}
