//! Configuration discovery and resolution

use super::types::{Config, FileConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Path of the global config file, relative to the home directory.
pub const GLOBAL_CONFIG_PATH: &str = ".config/contacts-book/config.toml";

pub const DATA_FILE_ENV: &str = "CB_DATA_FILE";
pub const LOCK_FILE_ENV: &str = "CB_LOCK_FILE";
pub const LOCK_TIMEOUT_ENV: &str = "CB_LOCK_TIMEOUT_MS";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Neither `CB_HOME` nor the platform home directory is available
    #[error("Could not determine home directory")]
    NoHome,
}

/// Command-line overrides for configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Override the data file path
    pub data_file: Option<PathBuf>,
    /// Override the lock file path
    pub lock_file: Option<PathBuf>,
    /// Path to config file override
    pub config_path: Option<PathBuf>,
}

/// Resolve configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables (`CB_DATA_FILE`, `CB_LOCK_FILE`, `CB_LOCK_TIMEOUT_MS`)
/// 3. Config file (`--config` or `~/.config/contacts-book/config.toml`)
/// 4. Defaults
pub fn resolve_config(overrides: &ConfigOverrides, home_dir: &Path) -> Result<Config, ConfigError> {
    let mut config = Config::defaults(home_dir);

    // 3. Config file
    let config_path = overrides
        .config_path
        .clone()
        .unwrap_or_else(|| home_dir.join(GLOBAL_CONFIG_PATH));
    if config_path.exists() {
        match load_config_file(&config_path) {
            Ok(file_config) => merge_config(&mut config, file_config),
            Err(e) => warn!("Failed to parse config at {config_path:?}: {e}"),
        }
    }

    // 2. Environment variables
    apply_env_overrides(&mut config);

    // 1. Command-line overrides
    apply_cli_overrides(&mut config, overrides);

    Ok(config)
}

/// Load config from a TOML file
fn load_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Merge file config into base config
fn merge_config(base: &mut Config, file: FileConfig) {
    if let Some(data_file) = file.storage.data_file {
        base.storage.data_file = data_file;
    }
    if let Some(lock_file) = file.storage.lock_file {
        base.storage.lock_file = lock_file;
    }
    if let Some(timeout) = file.storage.lock_timeout_ms {
        base.storage.lock_timeout_ms = timeout;
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Apply environment variable overrides
fn apply_env_overrides(config: &mut Config) {
    if let Some(data_file) = env_path(DATA_FILE_ENV) {
        config.storage.data_file = data_file;
    }

    if let Some(lock_file) = env_path(LOCK_FILE_ENV) {
        config.storage.lock_file = lock_file;
    }

    if let Ok(raw) = std::env::var(LOCK_TIMEOUT_ENV) {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.storage.lock_timeout_ms = ms,
            Err(_) => warn!("Ignoring invalid {LOCK_TIMEOUT_ENV}={raw:?}"),
        }
    }
}

/// Apply command-line overrides
fn apply_cli_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(ref data_file) = overrides.data_file {
        config.storage.data_file = data_file.clone();
    }

    if let Some(ref lock_file) = overrides.lock_file {
        config.storage.lock_file = lock_file.clone();
    }
}
