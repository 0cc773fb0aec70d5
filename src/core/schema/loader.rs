#![allow(clippy::result_large_err)]

use super::ParameterSchema;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Read and parse a schema file, reporting every failure.
pub fn read_schema(path: &Path) -> Result<ParameterSchema, AppError> {
    let text = fs::read_to_string(path).map_err(|err| {
        let category = if err.kind() == std::io::ErrorKind::NotFound {
            ErrorCategory::NotFoundError
        } else {
            ErrorCategory::IoError
        };
        AppError::new(
            category,
            format!("failed to read schema {}: {}", path.display(), err),
        )
    })?;
    ParameterSchema::parse(&text).map_err(|err| {
        AppError::new(
            ErrorCategory::SchemaError,
            format!("failed to parse schema {}: {}", path.display(), err),
        )
    })
}

/// Load a schema, degrading to `None` when it is missing or unusable.
///
/// A workflow that does not ship a schema is not an error for the caller:
/// it gets an empty form and an empty parameter set.
pub fn load_schema(path: &Path) -> Option<ParameterSchema> {
    match read_schema(path) {
        Ok(schema) => Some(schema),
        Err(err) => {
            warn!(
                path = %path.display(),
                code = %err.code,
                "no usable parameter schema: {}",
                err.message
            );
            None
        }
    }
}
