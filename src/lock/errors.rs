//! # Lock Errors

use thiserror::Error;

/// Result type for lock operations
pub type LockResult<T> = Result<T, LockError>;

/// Table lock errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("Timed out after {timeout_ms}ms waiting for lock on table {table}")]
    Timeout { table: String, timeout_ms: u64 },
}

impl LockError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            LockError::Timeout { .. } => "CHRONO_LOCK_TIMEOUT",
        }
    }

    /// Table the failed acquisition was for
    pub fn table(&self) -> &str {
        match self {
            LockError::Timeout { table, .. } => table,
        }
    }
}
