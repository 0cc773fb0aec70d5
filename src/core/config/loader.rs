#![allow(clippy::result_large_err)]

use super::{ConfigValidator, NfParamsConfig};
use crate::core::error::AppError;
use crate::core::resolver::MultiValuePolicy;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "nfparams.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from `path`, or from ./nfparams.toml when `path` is None.
    /// Environment variables override config file values.
    /// A missing file yields defaults + env vars.
    pub fn load(path: Option<&Path>) -> Result<NfParamsConfig, AppError> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let config_file = Self::load_from_file(&config_path)?;
        if config_file.is_none() {
            debug!(path = %config_path.display(), "config file not found, using defaults");
        }

        let mut config = config_file.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<NfParamsConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                crate::core::types::ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: NfParamsConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                crate::core::types::ErrorCategory::ConfigError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    pub fn apply_env_overrides(config: &mut NfParamsConfig) {
        // Workflow overrides
        if let Some(url) = non_empty_var("NFPARAMS_WORKFLOW_URL") {
            config.workflow.url = url;
        }

        if let Some(revision) = non_empty_var("NFPARAMS_WORKFLOW_REVISION") {
            config.workflow.revision = revision;
        }

        if let Some(schema) = non_empty_var("NFPARAMS_SCHEMA") {
            config.workflow.schema = Some(PathBuf::from(schema));
        }

        // Runtime overrides; NXF_HOME only fills an unset value
        if config.runtime.nxf_home.is_none() {
            if let Some(nxf_home) = non_empty_var("NXF_HOME") {
                config.runtime.nxf_home = Some(PathBuf::from(nxf_home));
            }
        }

        if let Some(params_dir) = non_empty_var("NFPARAMS_PARAMS_DIR") {
            config.runtime.params_dir = Some(PathBuf::from(params_dir));
        }

        // Launch overrides
        if let Some(endpoint) = non_empty_var("NFPARAMS_LOG_ENDPOINT") {
            config.launch.log_endpoint = Some(endpoint);
        }

        if let Some(profile) = non_empty_var("NFPARAMS_PROFILE") {
            config.launch.profile = Some(profile);
        }

        if let Some(email) = non_empty_var("NXF_USER_EMAIL") {
            config.notification.email = Some(email);
        }

        if let Some(policy) = non_empty_var("NFPARAMS_MULTI_VALUE_POLICY") {
            match policy.parse::<MultiValuePolicy>() {
                Ok(policy) => config.form.multi_value_policy = policy,
                Err(err) => warn!("ignoring NFPARAMS_MULTI_VALUE_POLICY: {}", err),
            }
        }

        if let Some(bind) = non_empty_var("NFPARAMS_BIND") {
            config.server.bind = bind;
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "NFPARAMS_WORKFLOW_URL - Override the workflow repository URL",
            "NFPARAMS_WORKFLOW_REVISION - Override the workflow revision (default: main)",
            "NFPARAMS_SCHEMA - Override the parameter schema path",
            "NXF_HOME - Nextflow home used when runtime.nxf_home is unset (default: <home>/.nextflow)",
            "NFPARAMS_PARAMS_DIR - Override the directory params files are written to",
            "NFPARAMS_LOG_ENDPOINT - Override the weblog endpoint",
            "NFPARAMS_PROFILE - Override the Nextflow profile",
            "NXF_USER_EMAIL - Notification address stored under EMAIL",
            "NFPARAMS_MULTI_VALUE_POLICY - Override the repeated field policy (first/last/reject)",
            "NFPARAMS_BIND - Override the form server bind address (default: 127.0.0.1:8085)",
        ]
    }

    /// Validate configuration values
    pub fn validate_config(config: &NfParamsConfig) -> Result<(), AppError> {
        ConfigValidator::validate(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
