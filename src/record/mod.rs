//! # Record Store
//!
//! Append-only tables split into one JSON file per UTC day, with latest and
//! point-in-time ("as of") reads.
//!
//! # Design Principles
//!
//! - Records are opaque JSON values; a caller-supplied function extracts
//!   each record's ISO-8601 timestamp
//! - A record's UTC calendar date picks its partition
//! - Partitions are read and rewritten whole; records are never mutated
//! - All operations on one table are serialized through its table lock
//!
//! Only in-process callers are coordinated. Two processes sharing a records
//! root can lose appends.

mod errors;
mod observer;
mod partition;
mod store;
pub mod timestamp;

pub use errors::{RecordError, RecordResult};
pub use observer::AppendObserver;
pub use partition::{validate_table_name, PartitionIndex, PARTITION_EXTENSION};
pub use store::{timestamp_field, RecordStore, TimestampFn, UpdateOutcome};
