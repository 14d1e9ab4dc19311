//! Byte stores backing a contact book
//!
//! A [`Store`] holds one opaque byte blob: the full serialized snapshot.
//! [`FileStore`] keeps it in a data file guarded by an exclusive lock file;
//! [`MemoryStore`] keeps it in memory for tests and embedding.

use crate::config::StorageConfig;
use crate::io::atomic::write_atomic;
use crate::io::error::StoreError;
use crate::io::lock::{acquire_store_lock, StoreLock};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Byte-oriented storage handle consumed by [`crate::Book`]
pub trait Store {
    /// Full contents of the store; empty when nothing was ever written
    fn read(&self) -> Result<Vec<u8>, StoreError>;

    /// Replace the full contents of the store
    fn write(&self, data: &[u8]) -> Result<(), StoreError>;

    /// Release the store; consuming `self` makes a second close impossible
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Data file guarded by an exclusive lock on a companion lock file
#[derive(Debug)]
pub struct FileStore {
    data_path: PathBuf,
    lock: StoreLock,
}

impl FileStore {
    /// Open the store, waiting at most `timeout` for the lock
    ///
    /// # Errors
    ///
    /// - `StoreError::Locked` naming `lock_path` if another process holds it
    /// - `StoreError::Cancelled` if `cancel` fires during the wait
    /// - `StoreError::Io` if the lock file cannot be created or locked
    pub fn open(
        data_path: impl Into<PathBuf>,
        lock_path: &Path,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Self, StoreError> {
        let data_path = data_path.into();
        info!("using storage {}", data_path.display());
        info!("with lock {}", lock_path.display());

        let lock = acquire_store_lock(lock_path, timeout, cancel)?;
        Ok(Self { data_path, lock })
    }

    /// Open the store described by a resolved [`StorageConfig`]
    pub fn from_config(
        config: &StorageConfig,
        cancel: &CancellationToken,
    ) -> Result<Self, StoreError> {
        Self::open(
            config.data_file.clone(),
            &config.lock_file,
            config.lock_timeout(),
            cancel,
        )
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn lock_path(&self) -> &Path {
        self.lock.path()
    }
}

impl Store for FileStore {
    fn read(&self) -> Result<Vec<u8>, StoreError> {
        match std::fs::read(&self.data_path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no data file at {:?}, starting empty", self.data_path);
                Ok(Vec::new())
            }
            Err(e) => Err(StoreError::io(&self.data_path, e)),
        }
    }

    fn write(&self, data: &[u8]) -> Result<(), StoreError> {
        write_atomic(&self.data_path, data)
    }

    fn close(self) -> Result<(), StoreError> {
        self.lock.release()
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store for development and testing.
///
/// Writes can be switched to fail so callers can exercise persistence errors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Vec<u8>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `data`.
    pub fn with_contents(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Mutex::new(data.into()),
            ..Self::default()
        }
    }

    /// Current bytes held by the store.
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make every following `write` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Store for MemoryStore {
    fn read(&self) -> Result<Vec<u8>, StoreError> {
        Ok(self.contents())
    }

    fn write(&self, data: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::io(
                "<memory>",
                std::io::Error::other("memory store configured to fail writes"),
            ));
        }
        *self.data.lock().unwrap_or_else(|e| e.into_inner()) = data.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn close(self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_millis(200);

    fn open_in(temp_dir: &TempDir) -> Result<FileStore, StoreError> {
        FileStore::open(
            temp_dir.path().join("contacts.json"),
            &temp_dir.path().join("contacts.lock"),
            TIMEOUT,
            &CancellationToken::new(),
        )
    }

    #[test]
    fn test_read_missing_data_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_in(&temp_dir).unwrap();

        assert!(store.read().unwrap().is_empty());
        assert!(!store.data_path().exists());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_in(&temp_dir).unwrap();

        store.write(b"[1,2,3]").unwrap();
        assert_eq!(store.read().unwrap(), b"[1,2,3]");

        store.write(b"[]").unwrap();
        assert_eq!(store.read().unwrap(), b"[]");
    }

    #[test]
    fn test_open_creates_lock_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_in(&temp_dir).unwrap();

        assert!(store.lock_path().exists());
        assert_eq!(store.lock_path(), temp_dir.path().join("contacts.lock"));
    }

    #[test]
    fn test_second_open_is_locked_until_close() {
        let temp_dir = TempDir::new().unwrap();
        let first = open_in(&temp_dir).unwrap();

        let err = open_in(&temp_dir).unwrap_err();
        assert!(matches!(err, StoreError::Locked { .. }));
        assert!(err.to_string().contains("contacts.lock"));

        first.close().unwrap();
        let _second = open_in(&temp_dir).unwrap();
    }

    #[test]
    fn test_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            data_file: temp_dir.path().join("book.json"),
            lock_file: temp_dir.path().join("book.lock"),
            lock_timeout_ms: 100,
        };

        let store = FileStore::from_config(&config, &CancellationToken::new()).unwrap();
        assert_eq!(store.data_path(), config.data_file.as_path());
        assert_eq!(store.lock_path(), config.lock_file.as_path());
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let store = MemoryStore::with_contents("[]");

        store.set_fail_writes(true);
        assert!(matches!(store.write(b"x"), Err(StoreError::Io { .. })));
        assert_eq!(store.contents(), b"[]");
        assert_eq!(store.write_count(), 0);

        store.set_fail_writes(false);
        store.write(b"x").unwrap();
        assert_eq!(store.contents(), b"x");
        assert_eq!(store.write_count(), 1);
    }
}
