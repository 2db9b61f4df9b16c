//! chronostore - content-addressed blobs and point-in-time record tables
//!
//! Two independent local stores:
//! - `blob`: deduplicated, gzip-compressed text addressed by SHA-1
//! - `record`: append-only tables partitioned by UTC day, with latest and
//!   as-of reads serialized per table

pub mod backend;
pub mod blob;
pub mod cli;
pub mod config;
pub mod lock;
pub mod record;

pub use backend::{LocalBackend, MemoryBackend, StorageBackend};
pub use blob::BlobStore;
pub use lock::TableLockManager;
pub use record::{timestamp_field, AppendObserver, RecordStore, UpdateOutcome};
