//! Date partition files: one JSON array per (table, UTC day).
//!
//! Layout: `<table>/<YYYY-MM-DD>.json`, pretty-printed with two-space
//! indentation. A partition is always read and rewritten in full.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use super::errors::{RecordError, RecordResult};
use super::timestamp::is_date_label;
use crate::backend::{join, StorageBackend};

/// File extension of partition files
pub const PARTITION_EXTENSION: &str = "json";

/// Rejects names that are not a single safe directory component.
pub fn validate_table_name(table: &str) -> RecordResult<()> {
    let unsafe_name = table.is_empty()
        || table == "."
        || table == ".."
        || table.contains(['/', '\\', '\0']);
    if unsafe_name {
        return Err(RecordError::InvalidTableName(table.to_string()));
    }
    Ok(())
}

/// Maps (table, date label) pairs to partition files on a backend.
#[derive(Debug)]
pub struct PartitionIndex<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PartitionIndex<B> {
    /// Create an index rooted at the backend root
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Root-relative path of one partition file
    pub fn partition_path(table: &str, label: &str) -> String {
        join(&[table, &format!("{}.{}", label, PARTITION_EXTENSION)])
    }

    /// Table directories under the root; empty if the root is missing.
    pub async fn tables(&self) -> RecordResult<BTreeSet<String>> {
        if !self.backend.exists("").await? {
            return Ok(BTreeSet::new());
        }

        let mut tables = BTreeSet::new();
        for name in self.backend.list("").await? {
            if validate_table_name(&name).is_ok() && self.backend.is_dir(&name).await? {
                tables.insert(name);
            }
        }
        Ok(tables)
    }

    /// Date labels of a table's partitions, newest first.
    pub async fn labels(&self, table: &str) -> RecordResult<Vec<String>> {
        if !self.backend.exists(table).await? {
            return Ok(Vec::new());
        }

        let suffix = format!(".{}", PARTITION_EXTENSION);
        let mut labels: Vec<String> = self
            .backend
            .list(table)
            .await?
            .into_iter()
            .filter_map(|name| name.strip_suffix(&suffix).map(str::to_string))
            .filter(|label| is_date_label(label))
            .collect();

        labels.sort_unstable_by(|a, b| b.cmp(a));
        Ok(labels)
    }

    /// Records of one partition in append order; empty if it doesn't exist.
    pub async fn read(&self, table: &str, label: &str) -> RecordResult<Vec<Value>> {
        let path = Self::partition_path(table, label);
        if !self.backend.exists(&path).await? {
            return Ok(Vec::new());
        }

        let bytes = self.backend.read(&path).await?;
        let records: Vec<Value> =
            serde_json::from_slice(&bytes).map_err(|e| RecordError::MalformedPartition {
                path: path.clone(),
                message: e.to_string(),
            })?;

        debug!(table = %table, partition = %label, records = records.len(), "partition read");
        Ok(records)
    }

    /// Replaces the whole partition with `records`.
    pub async fn write(&self, table: &str, label: &str, records: &[Value]) -> RecordResult<()> {
        let path = Self::partition_path(table, label);
        let json = serde_json::to_string_pretty(records).map_err(|e| RecordError::Encode {
            path: path.clone(),
            message: e.to_string(),
        })?;

        self.backend.ensure_dir(table).await?;
        self.backend.write(&path, json.as_bytes()).await?;
        Ok(())
    }
}
