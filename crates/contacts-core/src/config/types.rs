//! Configuration types

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the data file under the home directory.
pub const DEFAULT_DATA_FILE: &str = ".contacts-book.json";
/// File name of the lock file under the system temp directory.
pub const DEFAULT_LOCK_FILE: &str = "contacts-book.lock";
/// How long `open` waits for a contended lock before giving up.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 1000;

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Storage configuration
    pub storage: StorageConfig,
}

impl Config {
    /// Built-in defaults relative to the given home directory
    pub fn defaults(home_dir: &Path) -> Self {
        Self {
            storage: StorageConfig {
                data_file: home_dir.join(DEFAULT_DATA_FILE),
                lock_file: std::env::temp_dir().join(DEFAULT_LOCK_FILE),
                lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
            },
        }
    }
}

/// Where the contacts snapshot and its lock live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// JSON snapshot of all contacts
    pub data_file: PathBuf,
    /// Lock file guarding the data file across processes
    pub lock_file: PathBuf,
    /// Bounded wait for the lock, in milliseconds
    pub lock_timeout_ms: u64,
}

impl StorageConfig {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

/// On-disk shape of `config.toml`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub storage: FileStorageConfig,
}

/// `[storage]` table of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileStorageConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub lock_file: Option<PathBuf>,
    #[serde(default)]
    pub lock_timeout_ms: Option<u64>,
}
