//! Launch command and environment for a resolved run.
//!
//! The launcher process receives the run description through `NXF_USER_*`
//! variables; [`LaunchSpec::from_env`] reads them back and
//! [`LaunchSpec::command_line`] produces the `nextflow run` argument list.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const NEXTFLOW_EXECUTABLE: &str = "nextflow";

pub const ENV_NXF_HOME: &str = "NXF_HOME";
pub const ENV_WORKFLOW: &str = "NXF_USER_WORKFLOW";
pub const ENV_REVISION: &str = "NXF_USER_REVISION";
pub const ENV_PARAMS: &str = "NXF_USER_PARAMS";
pub const ENV_ENDPOINT: &str = "NXF_USER_ENDPOINT";
pub const ENV_PROFILE: &str = "NXF_USER_PROFILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchSpec {
    pub workflow: String,
    pub revision: Option<String>,
    pub params_file: Option<PathBuf>,
    pub log_endpoint: Option<String>,
    pub profile: Option<String>,
    pub resume: bool,
}

impl LaunchSpec {
    pub fn new(workflow: impl Into<String>) -> Self {
        Self {
            workflow: workflow.into(),
            revision: None,
            params_file: None,
            log_endpoint: None,
            profile: None,
            resume: true,
        }
    }

    pub fn with_revision(mut self, revision: Option<String>) -> Self {
        self.revision = non_empty(revision);
        self
    }

    pub fn with_params_file(mut self, params_file: Option<PathBuf>) -> Self {
        self.params_file = params_file.filter(|path| !path.as_os_str().is_empty());
        self
    }

    pub fn with_log_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.log_endpoint = non_empty(endpoint);
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = non_empty(profile);
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    /// Full argument vector, executable first.
    pub fn command_line(&self) -> Vec<String> {
        let mut args = vec![
            NEXTFLOW_EXECUTABLE.to_string(),
            "run".to_string(),
            self.workflow.clone(),
        ];
        if self.resume {
            args.push("-resume".to_string());
        }
        if let Some(revision) = &self.revision {
            args.extend(["-r".to_string(), revision.clone()]);
        }
        if let Some(params_file) = &self.params_file {
            args.extend([
                "-params-file".to_string(),
                params_file.display().to_string(),
            ]);
        }
        if let Some(endpoint) = &self.log_endpoint {
            args.extend(["-with-weblog".to_string(), endpoint.clone()]);
        }
        if let Some(profile) = &self.profile {
            args.extend(["-profile".to_string(), profile.clone()]);
        }
        args
    }

    /// Variables handed to the launcher process.
    pub fn environment(&self, nxf_home: &Path) -> BTreeMap<String, String> {
        let mut env = BTreeMap::new();
        env.insert(ENV_NXF_HOME.to_string(), nxf_home.display().to_string());
        env.insert(ENV_WORKFLOW.to_string(), self.workflow.clone());
        if let Some(revision) = &self.revision {
            env.insert(ENV_REVISION.to_string(), revision.clone());
        }
        if let Some(params_file) = &self.params_file {
            env.insert(ENV_PARAMS.to_string(), params_file.display().to_string());
        }
        if let Some(endpoint) = &self.log_endpoint {
            env.insert(ENV_ENDPOINT.to_string(), endpoint.clone());
        }
        if let Some(profile) = &self.profile {
            env.insert(ENV_PROFILE.to_string(), profile.clone());
        }
        env
    }

    /// Rebuild a spec from launcher variables; `None` without a workflow.
    pub fn from_env<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let workflow = non_empty(lookup(ENV_WORKFLOW))?;
        Some(
            Self::new(workflow)
                .with_revision(lookup(ENV_REVISION))
                .with_params_file(lookup(ENV_PARAMS).map(PathBuf::from))
                .with_log_endpoint(lookup(ENV_ENDPOINT))
                .with_profile(lookup(ENV_PROFILE)),
        )
    }

    pub fn from_process_env() -> Option<Self> {
        Self::from_env(|key| std::env::var(key).ok())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
