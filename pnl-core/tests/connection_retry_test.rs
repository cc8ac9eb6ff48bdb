//! Test for connection open behavior
//!
//! Run with: cargo test --test connection_retry_test -- --nocapture

use std::time::Instant;

use tempfile::TempDir;

use pnl_core::adapters::duckdb::DuckDbStorage;
use pnl_core::ports::KeyValueStore;

/// Test that multiple sequential connections work and see earlier writes
#[test]
fn test_sequential_connections() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test_sequential.duckdb");

    for i in 0..5 {
        let start = Instant::now();
        let storage = DuckDbStorage::new(&db_path).unwrap();
        storage.ensure_schema().unwrap();
        println!("Connection {}: opened in {:?}", i, start.elapsed());

        assert_eq!(storage.keys().unwrap().len(), i);
        storage
            .set_item(&format!("pnl_2024_{}", i), r#"{"1":1.0}"#)
            .unwrap();
        // Connection dropped at end of loop
    }
}

/// Re-running migrations on an existing database applies nothing new
#[test]
fn test_migrations_are_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test_migrations.duckdb");

    let first = DuckDbStorage::new(&db_path).unwrap().run_migrations().unwrap();
    assert!(!first.applied.is_empty());

    let second = DuckDbStorage::new(&db_path).unwrap().run_migrations().unwrap();
    assert!(second.applied.is_empty());
}

/// Errors that are not lock contention fail without retrying
#[test]
fn test_missing_directory_fails_fast() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("missing").join("test.duckdb");

    let start = Instant::now();
    assert!(DuckDbStorage::new(&db_path).is_err());
    println!("Failed after {:?}", start.elapsed());
}
