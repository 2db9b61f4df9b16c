//! # Table Locks
//!
//! Process-local mutual exclusion keyed by table name.
//!
//! For one table, holders are admitted in the order they asked (FIFO);
//! different tables never wait on each other. Every acquisition is bounded
//! by a timeout, after which the caller gets `LockError::Timeout` and the
//! guarded operation does not run.

mod errors;
mod manager;

pub use errors::{LockError, LockResult};
pub use manager::{Locked, TableGuard, TableLockManager, DEFAULT_LOCK_TIMEOUT};
