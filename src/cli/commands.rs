//! CLI command implementations
//!
//! Each command opens the stores it needs from the configuration, runs one
//! operation and returns the JSON payload of the response.

use serde_json::{json, Value};
use tracing::info;

use crate::backend::{LocalBackend, StorageBackend};
use crate::blob::BlobStore;
use crate::config::Config;
use crate::record::{timestamp_field, RecordStore};

use super::args::{BlobAction, Command, RecordAction};
use super::errors::CliResult;

fn blob_store(config: &Config) -> BlobStore<LocalBackend> {
    BlobStore::new(LocalBackend::new(config.blobs_path()))
}

fn record_store(config: &Config) -> RecordStore<LocalBackend> {
    RecordStore::new(
        LocalBackend::new(config.records_path()),
        timestamp_field(config.timestamp_field.clone()),
    )
    .with_lock_timeout(config.lock_timeout())
}

/// Run `command`. `input` is stdin content for commands that read it.
pub async fn execute(config: &Config, command: &Command, input: &str) -> CliResult<Value> {
    match command {
        Command::Init => init(config).await,
        Command::Blob { action } => blob(config, action, input).await,
        Command::Record { action } => record(config, action, input).await,
    }
}

/// Create the blob and record roots.
pub async fn init(config: &Config) -> CliResult<Value> {
    for root in [config.blobs_path(), config.records_path()] {
        LocalBackend::new(root).ensure_dir("").await?;
    }
    info!(data_dir = %config.data_dir, "data directory initialized");
    Ok(json!({ "data_dir": config.data_dir }))
}

async fn blob(config: &Config, action: &BlobAction, input: &str) -> CliResult<Value> {
    let store = blob_store(config);
    match action {
        BlobAction::Put => {
            let hash = store.persist(input).await?;
            Ok(json!({ "hash": hash }))
        }
        BlobAction::Get { hash } => {
            let data = store.read(hash).await?;
            Ok(json!({ "hash": hash, "data": data }))
        }
    }
}

async fn record(config: &Config, action: &RecordAction, input: &str) -> CliResult<Value> {
    let store = record_store(config);
    match action {
        RecordAction::Tables => {
            let names = store.get_table_names().await?;
            Ok(json!(names))
        }
        RecordAction::Append { table } => {
            let record: Value = serde_json::from_str(input)?;
            store.append_record_to_table(table, record.clone()).await?;
            Ok(json!({ "table": table, "record": record }))
        }
        RecordAction::Latest { table } => Ok(json!(store.read_latest_record(table).await?)),
        RecordAction::AsOf { table, instant } => Ok(json!(
            store.read_latest_record_as_of(table, instant).await?
        )),
        RecordAction::LatestAll => Ok(json!(store.get_latest_record_of_all_tables().await?)),
    }
}
