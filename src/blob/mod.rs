//! # Blob Store
//!
//! Content-addressed, gzip-compressed text payloads.
//!
//! A blob is identified by the SHA-1 of its UTF-8 bytes and stored at
//! `<hash[0..2]>/<hash[2..]>.gz`. Writes are idempotent: identical content
//! always maps to the same file, and an existing file is never rewritten.

mod compress;
mod errors;
mod hash;
mod store;

pub use compress::{compress, decompress};
pub use errors::{BlobError, BlobResult};
pub use hash::{digest_sha1, is_valid_hash, HASH_LEN};
pub use store::{blob_path, BlobStore, BLOB_EXTENSION};
