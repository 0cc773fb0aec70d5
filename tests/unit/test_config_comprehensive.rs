use nfparams::core::config::{ConfigLoader, NfParamsConfig};
use nfparams::core::resolver::MultiValuePolicy;
use nfparams::core::types::ErrorCategory;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ENV_VARS: [&str; 10] = [
    "NFPARAMS_WORKFLOW_URL",
    "NFPARAMS_WORKFLOW_REVISION",
    "NFPARAMS_SCHEMA",
    "NXF_HOME",
    "NFPARAMS_PARAMS_DIR",
    "NFPARAMS_LOG_ENDPOINT",
    "NFPARAMS_PROFILE",
    "NXF_USER_EMAIL",
    "NFPARAMS_MULTI_VALUE_POLICY",
    "NFPARAMS_BIND",
];

fn clear_env() {
    for name in ENV_VARS {
        env::remove_var(name);
    }
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("nfparams.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_full_config_and_runtime_paths() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[workflow]
url = "https://github.com/nf-core/rnaseq"
revision = "3.14.0"

[runtime]
home_dir_template = "/data/{username}"

[notification]
email = "alice@example.org"
"#,
    );

    let config = ConfigLoader::load(Some(&path)).unwrap();
    assert_eq!(config.workflow.revision, "3.14.0");
    assert_eq!(config.notification.email.as_deref(), Some("alice@example.org"));

    let paths = config.runtime_paths("alice");
    assert_eq!(paths.home_dir, PathBuf::from("/data/alice"));
    assert_eq!(
        paths.schema_path,
        PathBuf::from("/data/alice/.nextflow/assets/nf-core/rnaseq/nextflow_schema.json")
    );
}

#[test]
#[serial]
fn test_nxf_home_env_feeds_runtime_paths() {
    clear_env();
    env::set_var("NXF_HOME", "/srv/nextflow");
    env::set_var("NFPARAMS_WORKFLOW_URL", "https://github.com/nf-core/sarek");

    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::load(Some(&dir.path().join("missing.toml"))).unwrap();
    clear_env();

    let paths = config.runtime_paths("bob");
    assert_eq!(paths.nxf_home, PathBuf::from("/srv/nextflow"));
    assert_eq!(paths.params_dir, PathBuf::from("/srv/nextflow"));
    assert_eq!(
        paths.schema_path,
        PathBuf::from("/srv/nextflow/assets/nf-core/sarek/nextflow_schema.json")
    );
}

#[test]
#[serial]
fn test_email_and_policy_overrides() {
    clear_env();
    env::set_var("NXF_USER_EMAIL", "ops@example.org");
    env::set_var("NFPARAMS_MULTI_VALUE_POLICY", "reject");

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[notification]\nemail = \"file@example.org\"\n");
    let config = ConfigLoader::load(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.notification.email.as_deref(), Some("ops@example.org"));
    assert_eq!(config.form.multi_value_policy, MultiValuePolicy::Reject);
}

#[test]
#[serial]
fn test_invalid_values_fail_validation() {
    clear_env();
    let dir = TempDir::new().unwrap();

    let path = write_config(&dir, "[server]\nbind = \"nowhere\"\n");
    let err = ConfigLoader::load(Some(&path)).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ConfigError);

    env::set_var("NFPARAMS_BIND", "127.0.0.1:0");
    assert!(ConfigLoader::load(Some(&path)).is_ok());
    clear_env();
}

#[test]
#[serial]
fn test_unknown_policy_in_file_is_a_parse_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[form]\nmulti_value_policy = \"concat\"\n");
    let err = ConfigLoader::load(Some(&path)).unwrap_err();
    assert!(err.message.contains("Failed to parse config file"));
}

#[test]
fn test_default_config_serializes_to_toml() {
    let text = toml::to_string(&NfParamsConfig::default()).unwrap();
    let parsed: NfParamsConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed.server.bind, "127.0.0.1:8085");
    assert_eq!(parsed.form.multi_value_policy, MultiValuePolicy::First);
}
