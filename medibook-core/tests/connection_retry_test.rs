//! Tests for opening the store file
//!
//! Run with: cargo test --test connection_retry_test -- --nocapture

use std::time::{Duration, Instant};

use tempfile::TempDir;

use medibook_core::adapters::duckdb::DuckDbStore;
use medibook_core::ports::KeyValueStore;
use medibook_core::{BookingRequest, MedibookContext, STORE_FILENAME};

/// Repeated open/close cycles keep every write
#[test]
fn test_reopen_cycles_keep_data() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join(STORE_FILENAME);

    for i in 0..5 {
        let start = Instant::now();
        let store = DuckDbStore::open(&db_path).unwrap();
        store.ensure_schema().unwrap();
        println!("Cycle {}: opened in {:?}", i, start.elapsed());

        let key = format!("cycle_{}", i);
        store.set_item(&key, &i.to_string()).unwrap();
        assert_eq!(store.keys().unwrap().len(), i + 1);
    }
}

/// Errors that are not lock contention fail immediately instead of
/// waiting out the backoff
#[test]
fn test_non_lock_error_is_not_retried() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("missing").join("dir").join(STORE_FILENAME);

    let start = Instant::now();
    let result = DuckDbStore::open(&db_path);
    let elapsed = start.elapsed();

    assert!(result.is_err(), "Opening inside a missing directory should fail");
    assert!(
        elapsed < Duration::from_millis(500),
        "Should not back off on a non-retryable error, took {:?}",
        elapsed
    );
}

/// A second context over the same directory sees what the first wrote
#[test]
fn test_contexts_opened_in_sequence() {
    let temp_dir = TempDir::new().unwrap();

    {
        let ctx = MedibookContext::new(temp_dir.path(), None).unwrap();
        ctx.booking_service
            .book(BookingRequest::new("Dr. Emily Rodriguez", "2025-07-01", "10:15"))
            .unwrap();
    }

    let ctx = MedibookContext::new(temp_dir.path(), None).unwrap();
    let appointments = ctx.booking_service.list().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].time, "10:15");
}
