//! Per-command storage session: resolve paths, lock, load, run, release

use anyhow::Result;
use contacts_book_core::config::{resolve_config, ConfigOverrides, StorageConfig};
use contacts_book_core::home::get_home_dir;
use contacts_book_core::{Book, CancellationToken, FileStore};
use std::path::PathBuf;
use tracing::warn;

use super::error::CommandError;

/// Resolved storage settings plus the shutdown token for one invocation
#[derive(Debug)]
pub struct Session {
    storage: StorageConfig,
    cancel: CancellationToken,
}

impl Session {
    pub fn resolve(
        data_file: Option<PathBuf>,
        lock_file: Option<PathBuf>,
        config_path: Option<PathBuf>,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let home_dir = get_home_dir()?;
        let overrides = ConfigOverrides {
            data_file,
            lock_file,
            config_path,
        };
        let config = resolve_config(&overrides, &home_dir)?;

        Ok(Self {
            storage: config.storage,
            cancel,
        })
    }

    /// Run `f` against a freshly loaded book, releasing the lock afterwards
    ///
    /// The shutdown token is checked before locking and again before `f`.
    pub fn with_book<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Book<FileStore>) -> Result<T>,
    {
        self.check_cancelled()?;

        let store = FileStore::from_config(&self.storage, &self.cancel)?;
        let book = Book::open(store)?;

        let result = self.check_cancelled().and_then(|()| f(&book));

        if let Err(e) = book.close() {
            warn!("failed to close storage, {e}");
        }

        result
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(CommandError::Interrupted.into());
        }
        Ok(())
    }
}
