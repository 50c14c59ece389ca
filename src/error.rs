//! Error type shared by configuration validation and file I/O.
//!
//! The streaming core never fails: invalid points are skipped and degenerate
//! lines fall back to the initial slope. Only setting up a run (bad option
//! values, unreadable or malformed files) produces an [`Error`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for fallible setup and I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// An option value is outside its accepted range.
    #[error("invalid configuration value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Reading or writing a file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("failed to process JSON {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
