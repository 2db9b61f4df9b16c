//! Append Observer Tests
//!
//! The observer fires once per successful append, synchronously, with the
//! exact (table, record) pair persisted. Its errors abort the append.

use std::sync::{Arc, Mutex};

use chronostore::record::{timestamp_field, RecordError, RecordResult, RecordStore, UpdateOutcome};
use chronostore::MemoryBackend;
use serde_json::{json, Value};

type Calls = Arc<Mutex<Vec<(String, Value)>>>;

fn create_store() -> (RecordStore<MemoryBackend>, Calls) {
    let calls: Calls = Arc::default();
    let sink = calls.clone();
    let store = RecordStore::new(MemoryBackend::new(), timestamp_field("timestamp")).with_observer(
        move |table: &str, record: &Value| -> RecordResult<()> {
            sink.lock().unwrap().push((table.to_string(), record.clone()));
            Ok(())
        },
    );
    (store, calls)
}

#[tokio::test]
async fn test_notifies_on_append() {
    let (store, calls) = create_store();

    let record = json!({"timestamp": "2018-06-15T00:11:06Z", "test": "123"});
    store.append_record_to_table("myTable", record.clone()).await.unwrap();

    assert_eq!(*calls.lock().unwrap(), vec![("myTable".to_string(), record)]);
}

#[tokio::test]
async fn test_notifies_on_update() {
    let (store, calls) = create_store();

    store
        .update_latest_record("myTable2", |_| {
            UpdateOutcome::Append(json!({"timestamp": "2018-06-15T00:11:06Z", "test": "456"}))
        })
        .await
        .unwrap();
    store
        .update_latest_record("myTable2", |record| {
            let mut record = record.unwrap();
            record["timestamp"] = json!("2018-06-16T00:11:06Z");
            UpdateOutcome::Append(record)
        })
        .await
        .unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            (
                "myTable2".to_string(),
                json!({"timestamp": "2018-06-15T00:11:06Z", "test": "456"})
            ),
            (
                "myTable2".to_string(),
                json!({"timestamp": "2018-06-16T00:11:06Z", "test": "456"})
            ),
        ]
    );
}

#[tokio::test]
async fn test_no_notify_on_skip() {
    let (store, calls) = create_store();

    let outcome = store
        .update_latest_record("myTable", |_| UpdateOutcome::Skip)
        .await
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Skip);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_no_notify_on_invalid_timestamp() {
    let (store, calls) = create_store();

    let result = store
        .append_record_to_table("t", json!({"timestamp": "2018-06-31T00:00:00Z"}))
        .await;

    assert!(result.is_err());
    assert!(calls.lock().unwrap().is_empty());
}

/// A failing observer aborts the append before anything is written.
#[tokio::test]
async fn test_observer_error_aborts_append() {
    let backend = MemoryBackend::new();
    let store = RecordStore::new(backend.clone(), timestamp_field("timestamp")).with_observer(
        |table: &str, _: &Value| -> RecordResult<()> {
            Err(RecordError::Observer(format!("rejected {}", table)))
        },
    );

    let err = store
        .append_record_to_table("t", json!({"timestamp": "2018-07-01T00:00:00Z"}))
        .await
        .unwrap_err();

    assert!(matches!(err, RecordError::Observer(ref m) if m == "rejected t"));
    assert!(backend.file_paths().is_empty());
    assert_eq!(store.read_latest_record("t").await.unwrap(), None);
}
