//! Error types for tree mutation, packing, and unpacking.

use std::path::PathBuf;

/// Errors raised by `gztar` operations.
///
/// Lookups never produce an error; an unresolvable path is reported as `None`.
#[derive(Debug, thiserror::Error)]
pub enum TarballError {
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("failed to read byte source: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to encode archive: {0}")]
    Encode(#[source] std::io::Error),

    #[error("failed to decode archive: {0}")]
    Decode(#[source] std::io::Error),

    #[error("decoder task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("no file at {0:?}")]
    FileNotFound(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TarballError {
    pub(crate) fn invalid_path(path: &str, reason: &'static str) -> Self {
        TarballError::InvalidPath {
            path: path.to_string(),
            reason,
        }
    }
}

impl From<config::ConfigError> for TarballError {
    fn from(err: config::ConfigError) -> Self {
        TarballError::Config(err.to_string())
    }
}
