//! # Record Store Errors

use thiserror::Error;

use crate::backend::BackendError;
use crate::lock::LockError;

/// Result type for record store operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum RecordError {
    #[error("Date is not valid: got {0}")]
    InvalidTimestamp(String),

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Malformed partition {path}: {message}")]
    MalformedPartition { path: String, message: String },

    #[error("Failed to encode partition {path}: {message}")]
    Encode { path: String, message: String },

    #[error("Append observer failed: {0}")]
    Observer(String),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl RecordError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::InvalidTimestamp(_) => "CHRONO_RECORD_INVALID_TIMESTAMP",
            RecordError::InvalidTableName(_) => "CHRONO_RECORD_INVALID_TABLE",
            RecordError::MalformedPartition { .. } => "CHRONO_RECORD_MALFORMED_PARTITION",
            RecordError::Encode { .. } => "CHRONO_RECORD_ENCODE",
            RecordError::Observer(_) => "CHRONO_RECORD_OBSERVER",
            RecordError::Lock(e) => e.code(),
            RecordError::Backend(e) => e.code(),
        }
    }
}
