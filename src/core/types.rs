use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    ConfigError,
    SchemaError,
    TypeCastError,
    NotFoundError,
    PermissionError,
    SchemaViolation,
    SerializationError,
    IoError,
    InternalError,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ErrorCategory {
    /// Whether the person submitting the form can fix the problem by changing input.
    pub fn is_user_correctable(self) -> bool {
        matches!(
            self,
            ErrorCategory::TypeCastError
                | ErrorCategory::NotFoundError
                | ErrorCategory::PermissionError
                | ErrorCategory::SchemaViolation
        )
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Output format for rendered forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormFormat {
    #[default]
    Html,
    Json,
}

impl std::str::FromStr for FormFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "html" => Ok(FormFormat::Html),
            "json" => Ok(FormFormat::Json),
            _ => Err(format!(
                "invalid form format '{}'; supported values are html, json",
                value
            )),
        }
    }
}
