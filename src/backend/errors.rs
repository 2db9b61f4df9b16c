//! # Backend Errors

use std::io;

use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Storage backend errors
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },
}

impl BackendError {
    /// Map an I/O error, keeping not-found distinct
    pub fn from_io(path: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            BackendError::NotFound(path.to_string())
        } else {
            BackendError::Io {
                path: path.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            BackendError::NotFound(_) => "CHRONO_BACKEND_NOT_FOUND",
            BackendError::Io { .. } => "CHRONO_BACKEND_IO_ERROR",
        }
    }
}
