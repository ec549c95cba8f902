//! Settings file for the `reserve` binary.
//!
//! ```toml
//! banner_duration_ms = 3000
//! log_level = "info"
//! log_stdout = true
//! log_file = "reserve.log"
//!
//! [sink]
//! backend = "csv"
//! target = "submissions.csv"
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reserve_core::DEFAULT_BANNER_DURATION;
use reserve_core::sink::SinkConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "reserve.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long the success banner stays up, in milliseconds.
    pub banner_duration_ms: u64,
    /// Bare level or full `EnvFilter` directive.
    pub log_level: String,
    pub log_stdout: bool,
    pub log_file: Option<PathBuf>,
    pub sink: SinkConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            banner_duration_ms: DEFAULT_BANNER_DURATION.as_millis() as u64,
            log_level: "info".to_string(),
            log_stdout: true,
            log_file: None,
            sink: SinkConfig::default(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_duration_ms)
    }
}

impl fmt::Display for Settings {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Banner:        {} ms", self.banner_duration_ms)?;
        writeln!(f, "Sink:          {} {}", self.sink.backend, self.sink.target)?;
        writeln!(f, "Log level:     {}", self.log_level)?;
        writeln!(
            f,
            "Log file:      {}",
            self.log_file
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| "none".to_string())
        )?;
        write!(f, "Log to stdout: {}", self.log_stdout)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_the_form_behaviour() {
        let settings = Settings::default();
        assert_eq!(settings.banner_duration(), Duration::from_millis(3000));
        assert_eq!(settings.sink.backend, "log");
        assert!(settings.log_stdout);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_sink_table_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            banner_duration_ms = 500

            [sink]
            backend = "csv"
            "#,
        )
        .unwrap();

        assert_eq!(settings.banner_duration(), Duration::from_millis(500));
        assert_eq!(settings.sink.backend, "csv");
        assert_eq!(settings.sink.target, "");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result: Result<Settings, _> = toml::from_str("banner_duration_ms = \"soon\"");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::Read { .. })
        ));
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "log_stdout = maybe").unwrap();

        let err = Settings::load_or_default(&path).unwrap_err();

        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
