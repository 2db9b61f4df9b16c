//! # Local Filesystem Backend

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::errors::{BackendError, BackendResult};
use super::StorageBackend;

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this backend
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    async fn exists(&self, path: &str) -> BackendResult<bool> {
        match fs::metadata(self.full_path(path)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BackendError::from_io(path, e)),
        }
    }

    async fn is_dir(&self, path: &str) -> BackendResult<bool> {
        match fs::metadata(self.full_path(path)).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BackendError::from_io(path, e)),
        }
    }

    async fn ensure_dir(&self, path: &str) -> BackendResult<()> {
        fs::create_dir_all(self.full_path(path))
            .await
            .map_err(|e| BackendError::from_io(path, e))
    }

    async fn read(&self, path: &str) -> BackendResult<Vec<u8>> {
        fs::read(self.full_path(path))
            .await
            .map_err(|e| BackendError::from_io(path, e))
    }

    async fn write(&self, path: &str, data: &[u8]) -> BackendResult<()> {
        fs::write(self.full_path(path), data)
            .await
            .map_err(|e| BackendError::from_io(path, e))
    }

    async fn list(&self, path: &str) -> BackendResult<Vec<String>> {
        let mut entries = fs::read_dir(self.full_path(path))
            .await
            .map_err(|e| BackendError::from_io(path, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| BackendError::from_io(path, e))?
        {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }
}
