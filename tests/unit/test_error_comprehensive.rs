use nfparams::core::error::AppError;
use nfparams::core::resolver::ResolveError;
use nfparams::core::types::{ErrorCategory, ErrorSeverity};
use std::path::PathBuf;

#[test]
fn test_error_codes_follow_category() {
    let cases = [
        (ErrorCategory::ConfigError, "NFP-CFG-001"),
        (ErrorCategory::TypeCastError, "NFP-CAST-001"),
        (ErrorCategory::NotFoundError, "NFP-PATH-404"),
        (ErrorCategory::PermissionError, "NFP-PATH-403"),
        (ErrorCategory::SchemaViolation, "NFP-SCH-422"),
    ];
    for (category, code) in cases {
        let error = AppError::new(category, "boom");
        assert_eq!(error.code, code);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }
    assert_eq!(
        AppError::new(ErrorCategory::Unknown, "?").severity(),
        ErrorSeverity::Info
    );
}

#[test]
fn test_error_display_includes_code_and_category() {
    let error = AppError::new(ErrorCategory::SchemaError, "no definitions");
    assert_eq!(error.to_string(), "[NFP-SCH-001] SchemaError: no definitions");
}

#[test]
fn test_error_with_source_is_shown() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let error = AppError::with_source(ErrorCategory::IoError, "write failed", Box::new(io));
    assert!(error.to_string().contains("Caused by: disk full"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io.into();
    assert_eq!(error.category, ErrorCategory::IoError);
    assert!(!error.recovery_suggestions.is_empty());
}

#[test]
fn test_permission_error_conversion() {
    let error: AppError = ResolveError::Permission {
        param: "input".to_string(),
        paths: vec![PathBuf::from("/data/a.fq")],
    }
    .into();
    assert_eq!(error.category, ErrorCategory::PermissionError);
    assert_eq!(error.code, "NFP-PATH-403");
    assert_eq!(error.context.get("parameter"), Some(&"input".to_string()));
    assert!(error.message.contains("/data/a.fq"));
}

#[test]
fn test_invalid_schema_is_not_user_correctable() {
    let error: AppError = ResolveError::InvalidSchema {
        message: "bad $ref".to_string(),
    }
    .into();
    assert_eq!(error.category, ErrorCategory::SchemaError);
    assert!(error.context.is_empty());
    assert!(error.recovery_suggestions.is_empty());
}
