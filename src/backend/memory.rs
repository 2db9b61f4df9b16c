//! # In-Memory Backend
//!
//! Mirrors `LocalBackend` semantics without touching disk: writes need an
//! existing parent directory and listing a missing directory fails.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use super::errors::{BackendError, BackendResult};
use super::{parent, StorageBackend};

#[derive(Debug, Default)]
struct Tree {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, Vec<u8>>,
}

/// In-memory storage backend. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    tree: Arc<RwLock<Tree>>,
}

impl MemoryBackend {
    /// Create an empty backend (the root does not exist yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// All file paths currently stored, sorted
    pub fn file_paths(&self) -> Vec<String> {
        let tree = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        tree.files.keys().cloned().collect()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn exists(&self, path: &str) -> BackendResult<bool> {
        let tree = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tree.dirs.contains(path) || tree.files.contains_key(path))
    }

    async fn is_dir(&self, path: &str) -> BackendResult<bool> {
        let tree = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tree.dirs.contains(path))
    }

    async fn ensure_dir(&self, path: &str) -> BackendResult<()> {
        let mut tree = self.tree.write().unwrap_or_else(PoisonError::into_inner);
        let mut current = path;
        loop {
            tree.dirs.insert(current.to_string());
            if current.is_empty() {
                break;
            }
            current = parent(current);
        }
        Ok(())
    }

    async fn read(&self, path: &str) -> BackendResult<Vec<u8>> {
        let tree = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        tree.files
            .get(path)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, data: &[u8]) -> BackendResult<()> {
        let mut tree = self.tree.write().unwrap_or_else(PoisonError::into_inner);
        let dir = parent(path);
        if !tree.dirs.contains(dir) {
            return Err(BackendError::NotFound(dir.to_string()));
        }
        if tree.dirs.contains(path) {
            return Err(BackendError::Io {
                path: path.to_string(),
                message: "is a directory".to_string(),
            });
        }
        tree.files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn list(&self, path: &str) -> BackendResult<Vec<String>> {
        let tree = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        if !tree.dirs.contains(path) {
            return Err(BackendError::NotFound(path.to_string()));
        }

        let children = tree
            .dirs
            .iter()
            .filter(|d| !d.is_empty())
            .chain(tree.files.keys())
            .filter(|p| parent(p) == path)
            .map(|p| match p.rfind('/') {
                Some(idx) => p[idx + 1..].to_string(),
                None => p.to_string(),
            })
            .collect();

        Ok(children)
    }
}
