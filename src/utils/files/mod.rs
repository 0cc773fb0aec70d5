#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `data` to `path` so readers never observe a partial file.
///
/// The content goes to a temporary file in the destination directory first and
/// is then renamed over `path`.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AppError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to create {}: {}", parent.display(), err),
        )
    })?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|err| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to create temporary file in {}: {}", parent.display(), err),
        )
    })?;
    tmp.write_all(data)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|err| {
            AppError::new(
                ErrorCategory::IoError,
                format!("failed to write {}: {}", tmp.path().display(), err),
            )
        })?;
    tmp.persist(path).map_err(|err| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to move file into {}: {}", path.display(), err.error),
        )
    })?;
    Ok(())
}
