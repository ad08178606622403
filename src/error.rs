//! Error types for site generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that abort a build or prevent it from starting.
#[derive(Error, Debug)]
pub enum Error {
    /// Template or feed serialization failed
    #[error("failed to render {target}: {reason}")]
    Render { target: String, reason: String },

    /// Output sink could not store a file
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration is present but unusable
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Input file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Issue JSON could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config or theme manifest could not be decoded
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Issue tracker request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn render(target: impl Into<String>, reason: impl ToString) -> Self {
        Error::Render {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}

/// HTML document failure.
///
/// Never aborts a build: callers substitute a safe default (empty summary,
/// unmodified content) and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("failed to serialize HTML: {0}")]
    Serialize(String),
}
