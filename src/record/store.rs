//! The record store: append-only tables with point-in-time reads.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info};

use super::errors::{RecordError, RecordResult};
use super::observer::AppendObserver;
use super::partition::{validate_table_name, PartitionIndex};
use super::timestamp::{date_label, parse_instant, partition_label};
use crate::backend::StorageBackend;
use crate::lock::TableLockManager;

/// Extracts the ISO-8601 timestamp of a record
pub type TimestampFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Timestamp extractor reading a top-level string field.
pub fn timestamp_field(field: impl Into<String>) -> TimestampFn {
    let field = field.into();
    Arc::new(move |record: &Value| {
        record
            .get(field.as_str())
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

/// Result of an update function passed to `update_latest_record`
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Append this record as the new latest
    Append(Value),
    /// Leave the table untouched
    Skip,
}

impl UpdateOutcome {
    /// The appended record, if any
    pub fn appended(&self) -> Option<&Value> {
        match self {
            UpdateOutcome::Append(record) => Some(record),
            UpdateOutcome::Skip => None,
        }
    }
}

/// Date-partitioned record tables.
///
/// Every table operation except `get_table_names` holds that table's lock
/// for its whole duration.
pub struct RecordStore<B: StorageBackend> {
    partitions: PartitionIndex<B>,
    timestamp_of: TimestampFn,
    observer: Option<Arc<dyn AppendObserver>>,
    locks: TableLockManager,
}

impl<B: StorageBackend> fmt::Debug for RecordStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("partitions", &self.partitions)
            .field("observer", &self.observer.is_some())
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

impl<B: StorageBackend> RecordStore<B> {
    /// Create a store rooted at the backend root
    pub fn new(backend: B, timestamp_of: TimestampFn) -> Self {
        Self {
            partitions: PartitionIndex::new(backend),
            timestamp_of,
            observer: None,
            locks: TableLockManager::default(),
        }
    }

    /// Notify `observer` on every append
    pub fn with_observer(mut self, observer: impl AppendObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Bound table lock waits by `timeout` instead of the default
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.locks = TableLockManager::new(timeout);
        self
    }

    /// Table locks of this store
    pub fn locks(&self) -> &TableLockManager {
        &self.locks
    }

    /// Underlying backend
    pub fn backend(&self) -> &B {
        self.partitions.backend()
    }

    /// Names of all tables. Does not lock.
    pub async fn get_table_names(&self) -> RecordResult<BTreeSet<String>> {
        self.partitions.tables().await
    }

    /// Appends `record` to the partition of its timestamp's UTC date.
    pub async fn append_record_to_table(&self, table: &str, record: Value) -> RecordResult<()> {
        validate_table_name(table)?;
        let _guard = self.locks.acquire(table).await?;
        self.append_unlocked(table, record).await
    }

    /// The last-appended record of the newest non-empty partition.
    pub async fn read_latest_record(&self, table: &str) -> RecordResult<Option<Value>> {
        validate_table_name(table)?;
        let _guard = self.locks.acquire(table).await?;
        self.latest_unlocked(table).await
    }

    /// The last-appended record whose timestamp is at or before `as_of`.
    ///
    /// Partitions are scanned newest first, skipping those dated after
    /// `as_of`. Within a partition, append order decides, not timestamp order.
    pub async fn read_latest_record_as_of(
        &self,
        table: &str,
        as_of: &str,
    ) -> RecordResult<Option<Value>> {
        validate_table_name(table)?;
        let _guard = self.locks.acquire(table).await?;
        self.latest_as_of_unlocked(table, as_of).await
    }

    /// Read-modify-write of the latest record under one lock acquisition.
    ///
    /// `update` sees the current latest record (or `None`). An `Append`
    /// outcome is appended and returned; `Skip` leaves the table unchanged.
    pub async fn update_latest_record<F>(&self, table: &str, update: F) -> RecordResult<UpdateOutcome>
    where
        F: FnOnce(Option<Value>) -> UpdateOutcome,
    {
        validate_table_name(table)?;
        let _guard = self.locks.acquire(table).await?;

        let current = self.latest_unlocked(table).await?;
        let outcome = update(current);
        match &outcome {
            UpdateOutcome::Append(record) => self.append_unlocked(table, record.clone()).await?,
            UpdateOutcome::Skip => debug!(table = %table, "update skipped"),
        }

        Ok(outcome)
    }

    /// Latest record of every table, read concurrently.
    ///
    /// Each table's read takes that table's lock independently.
    pub async fn get_latest_record_of_all_tables(
        &self,
    ) -> RecordResult<BTreeMap<String, Option<Value>>> {
        let tables = self.get_table_names().await?;

        let reads = tables.into_iter().map(|table| async move {
            let latest = self.read_latest_record(&table).await?;
            Ok::<_, RecordError>((table, latest))
        });

        Ok(try_join_all(reads).await?.into_iter().collect())
    }

    fn extract_timestamp(&self, record: &Value) -> RecordResult<String> {
        (self.timestamp_of)(record)
            .ok_or_else(|| RecordError::InvalidTimestamp("<missing timestamp>".to_string()))
    }

    async fn append_unlocked(&self, table: &str, record: Value) -> RecordResult<()> {
        let timestamp = self.extract_timestamp(&record)?;
        let label = partition_label(&timestamp)?;

        let mut records = self.partitions.read(table, &label).await?;
        if let Some(observer) = &self.observer {
            observer.on_append(table, &record)?;
        }
        records.push(record);
        self.partitions.write(table, &label, &records).await?;

        info!(table = %table, partition = %label, records = records.len(), "record appended");
        Ok(())
    }

    async fn latest_unlocked(&self, table: &str) -> RecordResult<Option<Value>> {
        for label in self.partitions.labels(table).await? {
            let records = self.partitions.read(table, &label).await?;
            if let Some(last) = records.into_iter().last() {
                return Ok(Some(last));
            }
        }
        Ok(None)
    }

    async fn latest_as_of_unlocked(&self, table: &str, as_of: &str) -> RecordResult<Option<Value>> {
        let as_of_instant = parse_instant(as_of)?;
        let as_of_label = date_label(&as_of_instant)?;

        let labels = self.partitions.labels(table).await?;
        for label in labels.iter().filter(|label| label.as_str() <= as_of_label.as_str()) {
            let mut found = None;
            for record in self.partitions.read(table, label).await? {
                let instant = parse_instant(&self.extract_timestamp(&record)?)?;
                if instant <= as_of_instant {
                    found = Some(record);
                }
            }
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }
}
