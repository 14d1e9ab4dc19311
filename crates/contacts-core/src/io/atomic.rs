//! Atomic whole-file replacement

use crate::io::error::StoreError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sibling temp path used while replacing `path`
pub(crate) fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the contents of `path` with `data` atomically
///
/// Writes a sibling `<name>.tmp` file readable only by the owner, fsyncs it,
/// then renames it over `path`. Readers observe either the old contents or
/// the new contents, never a partial write. The parent directory is created
/// if missing.
///
/// # Errors
///
/// Returns `StoreError::Io` naming the path that failed.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let tmp_path = tmp_path_for(path);

    // A leftover from a crashed write may carry looser permissions
    if tmp_path.exists() {
        fs::remove_file(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
    }

    {
        let mut tmp_file = owner_only_options()
            .open(&tmp_path)
            .map_err(|e| StoreError::io(&tmp_path, e))?;

        tmp_file
            .write_all(data)
            .map_err(|e| StoreError::io(&tmp_path, e))?;

        tmp_file
            .sync_all()
            .map_err(|e| StoreError::io(&tmp_path, e))?;
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::io(path, e)
    })
}

#[cfg(unix)]
fn owner_only_options() -> fs::OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true).mode(0o600);
    options
}

#[cfg(not(unix))]
fn owner_only_options() -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    options
}
