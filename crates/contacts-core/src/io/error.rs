//! Error types for storage operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening, reading or writing a store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Another holder owns the storage lock
    #[error("storage locked by {path}")]
    Locked { path: PathBuf },

    /// The caller's cancellation token fired while waiting for the lock
    #[error("storage open cancelled while waiting for {path}")]
    Cancelled { path: PathBuf },

    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
