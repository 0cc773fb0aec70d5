#![allow(clippy::result_large_err)]

use super::{NfParamsConfig, USERNAME_PLACEHOLDER};
use crate::core::error::AppError;
use crate::core::resolver::MultiValuePolicy;
use crate::core::types::ErrorCategory;
use std::net::SocketAddr;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &NfParamsConfig) -> Result<(), AppError> {
        if !config
            .runtime
            .home_dir_template
            .contains(USERNAME_PLACEHOLDER)
        {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                format!(
                    "runtime.home_dir_template must contain {}",
                    USERNAME_PLACEHOLDER
                ),
            ));
        }

        if config.server.bind.parse::<SocketAddr>().is_err() {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                format!(
                    "server.bind '{}' is not a valid socket address",
                    config.server.bind
                ),
            ));
        }

        if config.server.max_body_bytes == 0 {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "server.max_body_bytes must be greater than zero",
            ));
        }

        if let Some(endpoint) = &config.launch.log_endpoint {
            if url::Url::parse(endpoint).is_err() {
                return Err(AppError::new(
                    ErrorCategory::ConfigError,
                    format!("launch.log_endpoint '{}' is not a valid URL", endpoint),
                ));
            }
        }

        Ok(())
    }

    /// Launching additionally needs a workflow to run.
    pub fn validate_for_launch(config: &NfParamsConfig) -> Result<(), AppError> {
        if config.workflow.url.trim().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "workflow.url is required to build a launch command",
            )
            .with_suggestion("Set [workflow] url in nfparams.toml or NFPARAMS_WORKFLOW_URL"));
        }
        Ok(())
    }

    /// The served form submits a checkbox together with its fallback input,
    /// which `reject` would always refuse.
    pub fn validate_for_serve(config: &NfParamsConfig) -> Result<(), AppError> {
        if config.form.multi_value_policy == MultiValuePolicy::Reject {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "form.multi_value_policy = \"reject\" cannot be used with the form server",
            )
            .with_suggestion("Use \"first\" or \"last\" when serving the form"));
        }
        Ok(())
    }
}
