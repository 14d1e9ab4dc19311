//! Whole-store file locking with a bounded probe

use crate::io::error::StoreError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

const INITIAL_BACKOFF: Duration = Duration::from_millis(50);
const MAX_BACKOFF: Duration = Duration::from_millis(400);

/// Exclusive lock on the store's lock file, released on drop
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
    released: bool,
}

impl StoreLock {
    /// Path of the lock file this guard holds
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock explicitly, surfacing unlock errors
    pub fn release(mut self) -> Result<(), StoreError> {
        self.released = true;
        FileExt::unlock(&self.file).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if !self.released {
            let _ = FileExt::unlock(&self.file);
        }
    }
}

/// Acquire the exclusive store lock at `path`
///
/// The lock file (and its parent directory) is created if absent. A shared
/// probe lock is attempted first, retrying with exponential backoff
/// (50ms, 100ms, 200ms, 400ms, 400ms, ...) until `timeout` has elapsed. Once
/// the probe succeeds the lock is escalated to exclusive without blocking.
///
/// # Errors
///
/// - `StoreError::Locked` if the probe times out or the escalation is contended
/// - `StoreError::Cancelled` if `cancel` fires while waiting
/// - `StoreError::Io` for any other failure opening or locking the file
pub fn acquire_store_lock(
    path: &Path,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<StoreLock, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;

    let deadline = Instant::now() + timeout;
    let mut backoff = INITIAL_BACKOFF;

    loop {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled {
                path: path.to_path_buf(),
            });
        }

        match FileExt::try_lock_shared(&file) {
            Ok(()) => break,
            Err(e) if is_contended(&e) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(StoreError::Locked {
                        path: path.to_path_buf(),
                    });
                }
                debug!("lock {path:?} busy, retrying in {backoff:?}");
                std::thread::sleep(backoff.min(deadline - now));
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
            Err(e) => return Err(StoreError::io(path, e)),
        }
    }

    match FileExt::try_lock_exclusive(&file) {
        Ok(()) => Ok(StoreLock {
            file,
            path: path.to_path_buf(),
            released: false,
        }),
        Err(e) if is_contended(&e) => {
            let _ = FileExt::unlock(&file);
            Err(StoreError::Locked {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(StoreError::io(path, e)),
    }
}

fn is_contended(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;

    const SHORT: Duration = Duration::from_millis(200);

    #[test]
    fn test_acquire_lock_creates_file_and_parent() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("nested/dir/test.lock");

        let lock = acquire_store_lock(&lock_path, SHORT, &CancellationToken::new()).unwrap();
        assert!(lock_path.exists());
        assert_eq!(lock.path(), lock_path.as_path());
    }

    #[test]
    fn test_second_acquire_is_locked() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("test.lock");
        let cancel = CancellationToken::new();

        let _held = acquire_store_lock(&lock_path, SHORT, &cancel).unwrap();
        let result = acquire_store_lock(&lock_path, SHORT, &cancel);

        match result {
            Err(StoreError::Locked { path }) => assert_eq!(path, lock_path),
            other => panic!("expected Locked, got {other:?}"),
        }
    }

    #[test]
    fn test_lock_released_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("test.lock");
        let cancel = CancellationToken::new();

        {
            let _lock = acquire_store_lock(&lock_path, SHORT, &cancel).unwrap();
        }

        let _again = acquire_store_lock(&lock_path, SHORT, &cancel).unwrap();
    }

    #[test]
    fn test_lock_released_explicitly() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("test.lock");
        let cancel = CancellationToken::new();

        let lock = acquire_store_lock(&lock_path, SHORT, &cancel).unwrap();
        lock.release().unwrap();

        let _again = acquire_store_lock(&lock_path, SHORT, &cancel).unwrap();
    }

    #[test]
    fn test_waits_for_short_lived_holder() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = Arc::new(temp_dir.path().join("test.lock"));
        let barrier = Arc::new(Barrier::new(2));

        let holder_path = Arc::clone(&lock_path);
        let holder_barrier = Arc::clone(&barrier);
        let holder = thread::spawn(move || {
            let _lock =
                acquire_store_lock(&holder_path, SHORT, &CancellationToken::new()).unwrap();
            holder_barrier.wait();
            thread::sleep(Duration::from_millis(100));
        });

        barrier.wait();
        let result = acquire_store_lock(&lock_path, Duration::from_secs(2), &CancellationToken::new());
        holder.join().unwrap();

        assert!(result.is_ok());
    }

    #[test]
    fn test_cancelled_token_stops_wait() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("test.lock");

        let _held = acquire_store_lock(&lock_path, SHORT, &CancellationToken::new()).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = acquire_store_lock(&lock_path, Duration::from_secs(5), &cancel);

        assert!(matches!(result, Err(StoreError::Cancelled { .. })));
    }
}
