use crate::core::types::ErrorCategory;
use std::path::PathBuf;

/// Why a submission could not be turned into a parameter set.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("cannot convert '{value}' for parameter '{param}' to {expected}")]
    TypeCast {
        param: String,
        value: String,
        expected: &'static str,
    },

    #[error("parameter '{param}': {pattern} does not exist")]
    NotFound { param: String, pattern: String },

    #[error("parameter '{param}': invalid path pattern '{pattern}': {message}")]
    InvalidPattern {
        param: String,
        pattern: String,
        message: String,
    },

    #[error("parameter '{param}': not readable: {}", join_paths(.paths))]
    Permission { param: String, paths: Vec<PathBuf> },

    #[error("parameter '{param}' was submitted {count} times")]
    MultipleValues { param: String, count: usize },

    #[error("parameters violate the schema at '{path}': {message}")]
    SchemaViolation { path: String, message: String },

    #[error("schema cannot be used for validation: {message}")]
    InvalidSchema { message: String },
}

impl ResolveError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ResolveError::TypeCast { .. } | ResolveError::MultipleValues { .. } => {
                ErrorCategory::TypeCastError
            }
            ResolveError::NotFound { .. } | ResolveError::InvalidPattern { .. } => {
                ErrorCategory::NotFoundError
            }
            ResolveError::Permission { .. } => ErrorCategory::PermissionError,
            ResolveError::SchemaViolation { .. } => ErrorCategory::SchemaViolation,
            ResolveError::InvalidSchema { .. } => ErrorCategory::SchemaError,
        }
    }

    /// The offending parameter, when the error concerns a single one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ResolveError::TypeCast { param, .. }
            | ResolveError::NotFound { param, .. }
            | ResolveError::InvalidPattern { param, .. }
            | ResolveError::Permission { param, .. }
            | ResolveError::MultipleValues { param, .. } => Some(param),
            ResolveError::SchemaViolation { .. } | ResolveError::InvalidSchema { .. } => None,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
