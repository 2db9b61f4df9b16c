//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::backend::BackendError;
use crate::blob::BlobError;
use crate::config::ConfigError;
use crate::record::RecordError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "CHRONO_CLI_CONFIG_ERROR",
            CliError::Backend(e) => e.code(),
            CliError::Blob(e) => e.code(),
            CliError::Record(e) => e.code(),
            CliError::Io(_) => "CHRONO_CLI_IO_ERROR",
            CliError::Json(_) => "CHRONO_CLI_JSON_ERROR",
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e.to_string())
    }
}
