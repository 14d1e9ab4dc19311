//! Configuration resolution
//!
//! Resolves storage locations from multiple sources with priority:
//! 1. Command-line flags (passed as parameters)
//! 2. Environment variables
//! 3. Config file (~/.config/contacts-book/config.toml)
//! 4. Defaults

mod discovery;
mod types;

pub use discovery::{
    resolve_config, ConfigError, ConfigOverrides, DATA_FILE_ENV, GLOBAL_CONFIG_PATH,
    LOCK_FILE_ENV, LOCK_TIMEOUT_ENV,
};
pub use types::{
    Config, FileConfig, FileStorageConfig, StorageConfig, DEFAULT_DATA_FILE, DEFAULT_LOCK_FILE,
    DEFAULT_LOCK_TIMEOUT_MS,
};
