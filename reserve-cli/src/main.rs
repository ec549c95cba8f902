use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use reserve_core::{FormField, SubmitOutcome};
use reserve_cli::settings::{DEFAULT_SETTINGS_FILE, Settings};
use reserve_cli::{app, logging, render};
use tokio::io::BufReader;
use tracing::{debug, info, warn};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Reserve an air fryer from the terminal.
///
/// Formats and validates the reservation form, then hands accepted
/// submissions to the configured sink.
#[derive(Debug, Parser)]
#[command(name = "reserve", version, about)]
struct Cli {
    /// Settings file. Defaults to `reserve.toml` when it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sink backend (`log` or `csv`).
    #[arg(long, global = true)]
    sink: Option<String>,

    /// Sink target, e.g. the CSV file for the `csv` backend.
    #[arg(long, global = true)]
    output: Option<String>,

    /// Log level or full `EnvFilter` directive.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Keep logs off stdout.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill the form from flags and submit it once.
    Submit(SubmitArgs),
    /// Prompt for each field until input ends.
    Interactive,
}

#[derive(Debug, Args)]
struct SubmitArgs {
    #[arg(long, default_value = "")]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,

    /// Any digits; formatted as `(DDD) DDD-DDDD`.
    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    email: String,

    /// Price guess in dollars. Applied as one edit, so a value with a
    /// second `.` is rejected.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    guess: String,

    /// 16-digit Spidr PIN.
    #[arg(long, default_value = "")]
    pin: String,
}

impl SubmitArgs {
    fn into_values(self) -> Vec<(FormField, String)> {
        vec![
            (FormField::FirstName, self.first_name),
            (FormField::LastName, self.last_name),
            (FormField::Phone, self.phone),
            (FormField::Email, self.email),
            (FormField::Guess, self.guess),
            (FormField::Pin, self.pin),
        ]
    }
}

// ─── settings ────────────────────────────────────────────────────────────────

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default(Path::new(DEFAULT_SETTINGS_FILE))?,
    };

    if let Some(backend) = &cli.sink {
        settings.sink.backend = backend.clone();
    }
    if let Some(target) = &cli.output {
        settings.sink.target = target.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
    if let Some(path) = &cli.log_file {
        settings.log_file = Some(path.clone());
    }
    if cli.quiet {
        settings.log_stdout = false;
    }
    Ok(settings)
}

fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    logging::init_logging(&settings.log_level);
    if !settings.log_stdout {
        logging::set_stdout_enabled(false)?;
    }
    if let Some(path) = &settings.log_file {
        logging::enable_file_logging(path)?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_tracing(&settings)?;
    info!(sink = %settings.sink.backend, "starting reserve");
    debug!("\n{settings}");

    let mut controller = app::build_controller(&settings).await?;

    match cli.command {
        Command::Submit(args) => {
            let outcome = app::submit_values(&mut controller, &args.into_values()).await?;
            print!("{}", render::render_form(&controller));

            if let SubmitOutcome::Rejected(errors) = outcome {
                warn!(count = errors.len(), "submission rejected");
                return Ok(ExitCode::FAILURE);
            }
            app::wait_for_banner(&controller).await;
        }
        Command::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            app::run_interactive(&mut controller, stdin, &mut std::io::stdout())
                .await
                .context("Interactive session failed")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
