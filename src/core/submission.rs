#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::launch::LaunchSpec;
use crate::core::params_file::ParamsFileWriter;
use crate::core::resolver::{FormResolver, MultiValuePolicy, ResolvedParams, SubmittedForm};
use crate::core::schema::ParameterSchema;
use std::path::PathBuf;
use tracing::info;

/// Outcome of one accepted submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub params: ResolvedParams,
    pub params_file: PathBuf,
    /// Launch spec pointing at `params_file`, when a workflow is configured.
    pub launch: Option<LaunchSpec>,
}

impl Submission {
    pub fn command_line(&self) -> Vec<String> {
        self.launch
            .as_ref()
            .map(LaunchSpec::command_line)
            .unwrap_or_default()
    }
}

/// Resolve a form, persist the parameters and prepare the launch.
#[derive(Debug, Clone)]
pub struct SubmissionPipeline {
    schema: ParameterSchema,
    policy: MultiValuePolicy,
    notification_address: Option<String>,
    writer: ParamsFileWriter,
    launch: Option<LaunchSpec>,
}

impl SubmissionPipeline {
    pub fn new(schema: ParameterSchema, writer: ParamsFileWriter) -> Self {
        Self {
            schema,
            policy: MultiValuePolicy::default(),
            notification_address: None,
            writer,
            launch: None,
        }
    }

    pub fn with_policy(mut self, policy: MultiValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_notification_address(mut self, address: Option<String>) -> Self {
        self.notification_address = address;
        self
    }

    /// Template for the launch; its params file is replaced per submission.
    pub fn with_launch(mut self, launch: Option<LaunchSpec>) -> Self {
        self.launch = launch;
        self
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    pub fn policy(&self) -> MultiValuePolicy {
        self.policy
    }

    pub fn submit(&self, form: &SubmittedForm) -> Result<Submission, AppError> {
        let params = FormResolver::new(&self.schema)
            .with_policy(self.policy)
            .with_notification_address(self.notification_address.clone())
            .resolve(form)?;
        let params_file = self.writer.write(&params)?;
        let launch = self
            .launch
            .clone()
            .map(|spec| spec.with_params_file(Some(params_file.clone())));
        info!(params_file = %params_file.display(), "submission accepted");
        Ok(Submission {
            params,
            params_file,
            launch,
        })
    }
}
