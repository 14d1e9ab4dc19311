//! Integration tests for cross-handle locking of the file store

use contacts_book_core::{Book, BookError, CancellationToken, FileStore, StoreError};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn open(dir: &Path, timeout: Duration) -> Result<FileStore, StoreError> {
    FileStore::open(
        dir.join("contacts.json"),
        &dir.join("locks/contacts.lock"),
        timeout,
        &CancellationToken::new(),
    )
}

#[test]
fn test_second_handle_is_locked() {
    let temp_dir = TempDir::new().unwrap();
    let _first = open(temp_dir.path(), Duration::from_millis(100)).unwrap();

    match open(temp_dir.path(), Duration::from_millis(100)) {
        Err(StoreError::Locked { path }) => {
            assert_eq!(path, temp_dir.path().join("locks/contacts.lock"));
        }
        other => panic!("expected Locked, got {other:?}"),
    }
}

#[test]
fn test_locked_open_gives_up_after_timeout() {
    let temp_dir = TempDir::new().unwrap();
    let _first = open(temp_dir.path(), Duration::from_millis(100)).unwrap();

    let started = Instant::now();
    let result = open(temp_dir.path(), Duration::from_millis(300));
    let waited = started.elapsed();

    assert!(matches!(result, Err(StoreError::Locked { .. })));
    assert!(waited >= Duration::from_millis(250), "gave up after {waited:?}");
    assert!(waited < Duration::from_secs(3), "waited {waited:?}");
}

#[test]
fn test_closed_book_releases_lock() {
    let temp_dir = TempDir::new().unwrap();

    let book = Book::open(open(temp_dir.path(), Duration::from_millis(100)).unwrap()).unwrap();
    book.close().unwrap();

    let _reopened = open(temp_dir.path(), Duration::from_millis(100)).unwrap();
}

#[test]
fn test_dropped_book_releases_lock() {
    let temp_dir = TempDir::new().unwrap();

    {
        let _book =
            Book::open(open(temp_dir.path(), Duration::from_millis(100)).unwrap()).unwrap();
    }

    let _reopened = open(temp_dir.path(), Duration::from_millis(100)).unwrap();
}

#[test]
fn test_locked_error_surfaces_through_book_error() {
    let temp_dir = TempDir::new().unwrap();
    let _first = open(temp_dir.path(), Duration::from_millis(100)).unwrap();

    let err: BookError = open(temp_dir.path(), Duration::from_millis(50))
        .unwrap_err()
        .into();

    assert!(err.to_string().starts_with("storage locked by"));
}
