//! Home directory resolution for contacts-book
//!
//! The data file and the global config file both live under the user's home
//! directory. `CB_HOME` overrides the platform lookup, which keeps tests and
//! sandboxed runs away from the real home directory.
//!
//! # Precedence
//!
//! 1. `CB_HOME` environment variable (if set and non-empty after trimming)
//! 2. `dirs::home_dir()` platform default
//!
//! # Testing
//!
//! CLI integration tests point `CB_HOME` at a temp dir:
//!
//! ```ignore
//! use assert_cmd::Command;
//! use tempfile::TempDir;
//!
//! let temp_dir = TempDir::new().unwrap();
//! let mut cmd = Command::cargo_bin("cb").unwrap();
//! cmd.env("CB_HOME", temp_dir.path());
//! ```

use crate::config::ConfigError;
use std::path::PathBuf;

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "CB_HOME";

/// Get the home directory for contacts-book operations
///
/// # Errors
///
/// Returns [`ConfigError::NoHome`] if `CB_HOME` is unset (or blank) and the
/// platform home directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    dirs::home_dir().ok_or(ConfigError::NoHome)
}
