//! Synchronous append notification.

use serde_json::Value;

use super::errors::RecordResult;

/// Notified of every successful append, before the partition is rewritten.
///
/// An error aborts the append: nothing is written and the error is returned
/// to the caller unchanged.
pub trait AppendObserver: Send + Sync {
    fn on_append(&self, table: &str, record: &Value) -> RecordResult<()>;
}

impl<F> AppendObserver for F
where
    F: Fn(&str, &Value) -> RecordResult<()> + Send + Sync,
{
    fn on_append(&self, table: &str, record: &Value) -> RecordResult<()> {
        self(table, record)
    }
}
