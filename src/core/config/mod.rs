use crate::core::resolver::MultiValuePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder replaced with the submitting user's name.
pub const USERNAME_PLACEHOLDER: &str = "{username}";

/// Main configuration loaded from nfparams.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NfParamsConfig {
    /// Workflow to launch and its schema
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Per-user directories
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Launch command options
    #[serde(default)]
    pub launch: LaunchConfig,

    /// Completion notification
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Form submission handling
    #[serde(default)]
    pub form: FormConfig,

    /// HTTP form server
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Workflow repository URL or name
    #[serde(default)]
    pub url: String,

    /// Revision passed with `-r`
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Explicit schema file; derived from the workflow URL when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Home directory pattern containing `{username}`
    #[serde(default = "default_home_dir_template")]
    pub home_dir_template: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nxf_home: Option<PathBuf>,

    /// Where params files are written; defaults to the Nextflow home
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Weblog endpoint passed with `-with-weblog`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default = "default_resume")]
    pub resume: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    #[serde(default)]
    pub multi_value_policy: MultiValuePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Largest accepted form body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Directories derived for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    pub home_dir: PathBuf,
    pub nxf_home: PathBuf,
    pub params_dir: PathBuf,
    pub schema_path: PathBuf,
}

impl NfParamsConfig {
    /// Derive the per-user directories from the configuration.
    pub fn runtime_paths(&self, username: &str) -> RuntimePaths {
        let home_dir = PathBuf::from(
            self.runtime
                .home_dir_template
                .replace(USERNAME_PLACEHOLDER, username),
        );
        let nxf_home = self
            .runtime
            .nxf_home
            .clone()
            .unwrap_or_else(|| home_dir.join(".nextflow"));
        let params_dir = self
            .runtime
            .params_dir
            .clone()
            .unwrap_or_else(|| nxf_home.clone());
        let schema_path = self
            .workflow
            .schema
            .clone()
            .unwrap_or_else(|| derived_schema_path(&nxf_home, &self.workflow.url));
        RuntimePaths {
            home_dir,
            nxf_home,
            params_dir,
            schema_path,
        }
    }
}

/// Last path segment of the workflow URL, e.g. `rnaseq`.
pub fn workflow_name(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Schema location inside the Nextflow asset cache:
/// `<nxf_home>/assets/<owner>/<repo>/nextflow_schema.json`.
pub fn derived_schema_path(nxf_home: &Path, workflow_url: &str) -> PathBuf {
    let asset = match url::Url::parse(workflow_url) {
        Ok(parsed) if parsed.has_host() => parsed.path().trim_matches('/').to_string(),
        _ => workflow_url.trim_matches('/').to_string(),
    };
    nxf_home
        .join("assets")
        .join(asset)
        .join("nextflow_schema.json")
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_home_dir_template() -> String {
    format!("/home/{}", USERNAME_PLACEHOLDER)
}

fn default_resume() -> bool {
    true
}

fn default_bind() -> String {
    "127.0.0.1:8085".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        WorkflowConfig {
            url: String::new(),
            revision: default_revision(),
            schema: None,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            home_dir_template: default_home_dir_template(),
            nxf_home: None,
            params_dir: None,
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        LaunchConfig {
            log_endpoint: None,
            profile: None,
            resume: default_resume(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
