#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::resolver::ResolvedParams;
use crate::core::types::ErrorCategory;
use crate::utils::files::atomic_write;
use crate::utils::serialization::compute_sha256_hex;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes resolved parameters to content-addressed files.
///
/// A file is named after the digest of its canonical JSON, so resubmitting the
/// same parameters rewrites the same file.
#[derive(Debug, Clone)]
pub struct ParamsFileWriter {
    dir: PathBuf,
}

impl ParamsFileWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Destination for `params` without writing anything.
    pub fn path_for(&self, params: &ResolvedParams) -> Result<PathBuf, AppError> {
        let (_, file_name) = encode(params)?;
        Ok(self.dir.join(file_name))
    }

    pub fn write(&self, params: &ResolvedParams) -> Result<PathBuf, AppError> {
        let (content, file_name) = encode(params)?;
        let path = self.dir.join(file_name);
        atomic_write(&path, content.as_bytes())?;
        info!(path = %path.display(), params = params.len(), "params file written");
        Ok(path)
    }
}

fn encode(params: &ResolvedParams) -> Result<(String, String), AppError> {
    let content = params.to_canonical_json().map_err(|err| {
        AppError::new(
            ErrorCategory::SerializationError,
            format!("failed to serialize parameters: {}", err),
        )
    })?;
    let file_name = format!("{}.json", compute_sha256_hex(content.as_bytes()));
    Ok((content, file_name))
}
