//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON or has the wrong shape.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// The token style name is not one of `plain`, `ascii` or `extended`.
    #[error("unknown token style '{0}', expected plain, ascii or extended")]
    UnknownStyle(String),
}

impl ConfigError {
    /// Creates a read error for the given path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
