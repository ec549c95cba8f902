//! Logging setup for the `reserve` binary.
//!
//! A single registry feeds two layers: stdout (coloured on a terminal, with a
//! runtime on/off gate) and a log file that stays silent until
//! [`enable_file_logging`] points it at a path. One `EnvFilter` caps both.

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::Result;
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const FALLBACK_LEVEL: &str = "info";

/// `<local time> <LEVEL> <file:line> <fields>`, ANSI-styled when the writer
/// supports it.
struct LocalTimeFormat;

impl LocalTimeFormat {
    fn level_style(level: &Level) -> &'static str {
        match *level {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        }
    }
}

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if ansi {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{:>5}\x1b[0m ",
                Self::level_style(meta.level()),
                meta.level()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} ", meta.level())?;
        }

        let file = meta.file().map(|f| {
            f.rsplit_once("src/")
                .or_else(|| f.rsplit_once("src\\"))
                .map_or(f, |(_, rest)| rest)
        });
        if let (Some(file), Some(line)) = (file, meta.line()) {
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writer target that can be pointed at a file after initialization.
/// Records are discarded while no file is set.
#[derive(Clone)]
struct LogFileSlot(SharedFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFileSlot {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type SetBoolFn = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

static SET_STDOUT_ENABLED: OnceLock<SetBoolFn> = OnceLock::new();
static LOG_FILE: OnceLock<SharedFile> = OnceLock::new();

/// `RUST_LOG` wins over the configured level; an unparsable level falls
/// back to `info`.
fn initial_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

fn not_initialized() -> anyhow::Error {
    anyhow::anyhow!("logging not yet initialized")
}

/// Shows or hides stdout output without affecting file logging.
pub fn set_stdout_enabled(enabled: bool) -> Result<()> {
    let set = SET_STDOUT_ENABLED.get().ok_or_else(not_initialized)?;
    set(enabled)
}

/// Starts appending log output to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    let slot = LOG_FILE.get().ok_or_else(not_initialized)?;
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

/// Installs the global subscriber. Call once at startup; later calls are
/// ignored.
///
/// `level` is used unless `RUST_LOG` is set.
pub fn init_logging(level: &str) {
    let file: SharedFile = Arc::new(Mutex::new(None));

    let level_filter = initial_filter(level);
    // Starts open; the global filter above is still the ceiling.
    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(false)
        .with_writer(LogFileSlot(file.clone()));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    let _ = LOG_FILE.set(file);
    let _ = SET_STDOUT_ENABLED.set(Box::new(move |enabled: bool| {
        let gate = if enabled { "trace" } else { "off" };
        stdout_handle
            .reload(EnvFilter::new(gate))
            .map_err(|e| anyhow::anyhow!("stdout reload failed: {e}"))
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_level_falls_back() {
        // Must not panic on garbage input.
        let _ = initial_filter("no such level [[");
    }

    #[test]
    fn enable_file_logging_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("reserve.log");

        let err = enable_file_logging(&path).unwrap_err();

        assert!(err.to_string().contains("cannot open log file"));
    }

    #[test]
    fn installed_subscriber_writes_to_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reserve.log");

        init_logging("info");
        set_stdout_enabled(false).unwrap();
        enable_file_logging(&path).unwrap();
        tracing::warn!(marker = "file-layer-check", "log file test");
        set_stdout_enabled(true).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents
            .lines()
            .find(|l| l.contains("file-layer-check"))
            .expect("event should reach the log file");
        assert!(line.contains(" WARN "));
        assert!(line.contains("logging.rs:"));
        assert!(!line.contains("\x1b["));
    }

    #[test]
    fn file_slot_discards_until_a_file_is_set() {
        let slot = LogFileSlot(Arc::new(Mutex::new(None)));
        let mut writer = slot.make_writer();
        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        writer.flush().unwrap();
    }

    #[test]
    fn file_slot_writes_once_a_file_is_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reserve.log");
        let file = File::create(&path).unwrap();
        let slot = LogFileSlot(Arc::new(Mutex::new(Some(file))));

        slot.make_writer().write_all(b"hello\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
