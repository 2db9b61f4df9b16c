//! Blob persistence over a storage backend.

use tracing::debug;

use super::compress::{compress, decompress};
use super::errors::{BlobError, BlobResult};
use super::hash::{digest_sha1, is_valid_hash};
use crate::backend::{join, parent, StorageBackend};

/// File extension of stored blobs
pub const BLOB_EXTENSION: &str = "gz";

/// Root-relative path of the blob with `hash`: `<first 2>/<rest 38>.gz`.
pub fn blob_path(hash: &str) -> BlobResult<String> {
    if !is_valid_hash(hash) {
        return Err(BlobError::InvalidHash(hash.to_string()));
    }
    let (first, rest) = hash.split_at(2);
    Ok(join(&[first, &format!("{}.{}", rest, BLOB_EXTENSION)]))
}

/// Content-addressed blob store
#[derive(Debug)]
pub struct BlobStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> BlobStore<B> {
    /// Create a blob store rooted at the backend root
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persists `data` and returns its hash.
    ///
    /// Writes at most once per distinct content; later calls only check
    /// that the target exists.
    pub async fn persist(&self, data: &str) -> BlobResult<String> {
        let hash = digest_sha1(data);
        let path = blob_path(&hash)?;

        if self.backend.exists(&path).await? {
            debug!(hash = %hash, "blob already stored");
            return Ok(hash);
        }

        self.backend.ensure_dir(parent(&path)).await?;
        let packed = compress(data)?;
        self.backend.write(&path, &packed).await?;
        debug!(hash = %hash, bytes = data.len(), compressed = packed.len(), "blob written");

        Ok(hash)
    }

    /// Reads the text stored under `hash`.
    ///
    /// A hash that isn't 40 hex characters can't name a stored blob and is
    /// reported as not found.
    pub async fn read(&self, hash: &str) -> BlobResult<String> {
        if !is_valid_hash(hash) {
            return Err(BlobError::NotFound(hash.to_string()));
        }
        let path = blob_path(hash)?;
        if !self.backend.exists(&path).await? {
            return Err(BlobError::NotFound(hash.to_string()));
        }
        let packed = self.backend.read(&path).await?;
        decompress(&packed)
    }

    /// Whether a blob with `hash` is stored.
    pub async fn contains(&self, hash: &str) -> BlobResult<bool> {
        if !is_valid_hash(hash) {
            return Ok(false);
        }
        let path = blob_path(hash)?;
        Ok(self.backend.exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn test_blob_path_layout() {
        let path = blob_path("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed").unwrap();
        assert_eq!(path, "2a/ae6c35c94fcfb415dbe95f408b9ce91ee846ed.gz");
    }

    #[test]
    fn test_blob_path_rejects_bad_hash() {
        assert!(matches!(blob_path("2a"), Err(BlobError::InvalidHash(_))));
    }

    #[tokio::test]
    async fn test_persist_writes_once() {
        let backend = MemoryBackend::new();
        let store = BlobStore::new(backend.clone());

        let h1 = store.persist("hello world").await.unwrap();
        let h2 = store.persist("hello world").await.unwrap();
        assert_eq!(h1, h2);
        assert_eq!(
            backend.file_paths(),
            vec!["2a/ae6c35c94fcfb415dbe95f408b9ce91ee846ed.gz"]
        );
    }

    #[tokio::test]
    async fn test_existing_file_not_rewritten() {
        let backend = MemoryBackend::new();
        let store = BlobStore::new(backend.clone());

        let hash = store.persist("payload").await.unwrap();
        let path = blob_path(&hash).unwrap();
        let marker = compress("tampered").unwrap();
        backend.write(&path, &marker).await.unwrap();

        store.persist("payload").await.unwrap();
        assert_eq!(store.read(&hash).await.unwrap(), "tampered");
    }

    #[tokio::test]
    async fn test_contains() {
        let store = BlobStore::new(MemoryBackend::new());
        let hash = store.persist("abc").await.unwrap();
        assert!(store.contains(&hash).await.unwrap());
        assert!(!store
            .contains("4331da668340f24ec7bf7e9fb934ce3ff1497f1b")
            .await
            .unwrap());
        assert!(!store.contains("../escape").await.unwrap());
    }
}
