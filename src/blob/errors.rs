//! # Blob Errors

use thiserror::Error;

use crate::backend::BackendError;

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Blob store errors
#[derive(Debug, Clone, Error)]
pub enum BlobError {
    #[error("Blob {0} doesn't exist")]
    NotFound(String),

    #[error("Invalid blob hash: {0}")]
    InvalidHash(String),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Blob content is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl BlobError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            BlobError::NotFound(_) => "CHRONO_BLOB_NOT_FOUND",
            BlobError::InvalidHash(_) => "CHRONO_BLOB_INVALID_HASH",
            BlobError::Compression(_) => "CHRONO_BLOB_COMPRESSION",
            BlobError::InvalidUtf8(_) => "CHRONO_BLOB_INVALID_UTF8",
            BlobError::Backend(e) => e.code(),
        }
    }
}
