//! Logging System
//!
//! Structured logging using the `tracing` crate. The library only emits
//! events; binaries call [`init_logging`] to install a subscriber.
//!
//! Environment overrides, highest precedence first:
//! `GZTAR_LOG` (filter directives), `GZTAR_LOG_FORMAT`, `GZTAR_LOG_OUTPUT`,
//! `GZTAR_LOG_FILE`.

use crate::error::TarballError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Event encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = TarballError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(TarballError::Config(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where events are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    #[default]
    Stderr,
    File,
}

impl FromStr for LogOutput {
    type Err = TarballError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            other => Err(TarballError::Config(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
                other
            ))),
        }
    }
}

/// Logging configuration, the `[logging]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Default filter level: trace, debug, info, warn, error, off
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Log file for `output = "file"`; `None` uses the platform state dir
    pub file: Option<PathBuf>,
    /// ANSI colors for text output on a terminal stream
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "warn".to_string(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file: None,
            color: true,
        }
    }
}

impl LoggingConfig {
    /// Copy with `GZTAR_LOG_FORMAT` and `GZTAR_LOG_OUTPUT` applied.
    fn with_env_overrides(&self) -> Result<Self, TarballError> {
        let mut config = self.clone();
        if let Ok(format) = std::env::var("GZTAR_LOG_FORMAT") {
            config.format = format.parse()?;
        }
        if let Ok(output) = std::env::var("GZTAR_LOG_OUTPUT") {
            config.output = output.parse()?;
        }
        Ok(config)
    }

    fn env_filter(&self) -> Result<EnvFilter, TarballError> {
        if let Ok(filter) = EnvFilter::try_from_env("GZTAR_LOG") {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level)
            .map_err(|e| TarballError::Config(format!("Invalid log level {:?}: {}", self.level, e)))
    }
}

/// Log file location: `GZTAR_LOG_FILE`, then the configured file, then
/// `<state dir>/gztar.log`.
pub fn resolve_log_file_path(config_file: Option<&Path>) -> Result<PathBuf, TarballError> {
    if let Ok(env_path) = std::env::var("GZTAR_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(path) = config_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path.to_path_buf());
    }
    let dirs = directories::ProjectDirs::from("", "gztar", "gztar").ok_or_else(|| {
        TarballError::Config("Could not determine platform directories for log file".to_string())
    })?;
    let base = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Ok(base.join("gztar.log"))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), TarballError> {
    let config = config.cloned().unwrap_or_default().with_env_overrides()?;
    let installed = if !config.enabled {
        Registry::default().with(EnvFilter::new("off")).try_init()
    } else {
        let writer = match config.output {
            LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
            LogOutput::File => {
                let path = resolve_log_file_path(config.file.as_deref())?;
                BoxMakeWriter::new(Mutex::new(open_log_file(&path)?))
            }
        };
        let layer = match config.format {
            LogFormat::Json => fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(writer)
                .boxed(),
            LogFormat::Text => fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(config.color && config.output != LogOutput::File)
                .with_writer(writer)
                .boxed(),
        };
        Registry::default()
            .with(config.env_filter()?)
            .with(layer)
            .try_init()
    };
    installed.map_err(|e| TarballError::Config(format!("Failed to install subscriber: {}", e)))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, TarballError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| TarballError::Config(format!("Failed to create log directory: {}", e)))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TarballError::Config(format!("Failed to open log file {:?}: {}", path, e)))
}
