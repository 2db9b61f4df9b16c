//! # Storage Backend
//!
//! The file-system boundary shared by the blob and record stores.
//!
//! Paths are relative to the backend root and always `/`-separated.
//! The empty path names the root itself.

mod errors;
mod local;
mod memory;

pub use errors::{BackendError, BackendResult};
pub use local::LocalBackend;
pub use memory::MemoryBackend;

use async_trait::async_trait;

/// Backend trait for store persistence
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Check if a file or directory exists at path
    async fn exists(&self, path: &str) -> BackendResult<bool>;

    /// Check if path is an existing directory
    async fn is_dir(&self, path: &str) -> BackendResult<bool>;

    /// Create the directory at path, including parents
    async fn ensure_dir(&self, path: &str) -> BackendResult<()>;

    /// Read the file at path
    async fn read(&self, path: &str) -> BackendResult<Vec<u8>>;

    /// Write the file at path, replacing any previous content
    async fn write(&self, path: &str, data: &[u8]) -> BackendResult<()>;

    /// List entry names directly under path
    async fn list(&self, path: &str) -> BackendResult<Vec<String>>;
}

/// Joins root-relative path segments with `/`, skipping empty ones.
pub fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the parent of a root-relative path (`""` for top-level entries).
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}
