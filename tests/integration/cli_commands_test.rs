use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CLEARED_VARS: [&str; 9] = [
    "NFPARAMS_WORKFLOW_URL",
    "NFPARAMS_SCHEMA",
    "NFPARAMS_PARAMS_DIR",
    "NFPARAMS_LOG_ENDPOINT",
    "NFPARAMS_PROFILE",
    "NFPARAMS_MULTI_VALUE_POLICY",
    "NXF_USER_EMAIL",
    "NXF_HOME",
    "RUST_LOG",
];

fn fixture_path() -> &'static Path {
    Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/nextflow_schema.json"
    ))
}

fn nfparams(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nfparams").unwrap();
    cmd.current_dir(workdir.path());
    for name in CLEARED_VARS {
        cmd.env_remove(name);
    }
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("form"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("launch-command"));
}

#[test]
fn test_form_json_lists_visible_fields() {
    let dir = TempDir::new().unwrap();
    let output = nfparams(&dir)
        .args(["form", "--user", "alice", "--format", "json", "--schema"])
        .arg(fixture_path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let fields: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sections: Vec<&str> = fields
        .as_array()
        .unwrap()
        .iter()
        .map(|field| field["name"].as_str().unwrap())
        .collect();
    assert_eq!(sections, ["input_output_options", "alignment_options"]);
    assert_eq!(fields[1]["fields"][0]["kind"], "select");
}

#[test]
fn test_form_html_is_the_default() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .args(["form", "--user", "alice", "--schema"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<div class="card">"#))
        .stdout(predicate::str::contains(r#"name="threads""#));
}

#[test]
fn test_form_without_schema_is_empty() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .args(["form", "--user", "alice", "--format", "json", "--schema"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_resolve_writes_params_file() {
    let dir = TempDir::new().unwrap();
    let params_dir = dir.path().join("params");
    let output = nfparams(&dir)
        .args(["resolve", "--user", "alice", "--param", "threads=12"])
        .args(["--param", "skip_qc=on", "--schema"])
        .arg(fixture_path())
        .arg("--params-dir")
        .arg(&params_dir)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let path = PathBuf::from(stdout.trim());
    assert!(path.starts_with(&params_dir));
    let params: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(params["threads"], 12);
    assert_eq!(params["skip_qc"], true);
    assert_eq!(params["outdir"], "results");
}

#[test]
fn test_resolve_rejects_bad_value() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .args(["resolve", "--user", "alice", "--param", "threads=lots", "--schema"])
        .arg(fixture_path())
        .arg("--params-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("NFP-CAST-001"));
}

#[test]
fn test_resolve_print_command_needs_workflow() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .args(["resolve", "--user", "alice", "--print-command", "--schema"])
        .arg(fixture_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("workflow.url"));
}

#[test]
fn test_resolve_print_command_with_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("nfparams.toml"),
        "[workflow]\nurl = \"https://github.com/nf-core/rnaseq\"\nrevision = \"3.14.0\"\n\n[notification]\nemail = \"alice@example.org\"\n",
    )
    .unwrap();

    let output = nfparams(&dir)
        .args(["resolve", "--user", "alice", "--print-command", "--schema"])
        .arg(fixture_path())
        .arg("--params-dir")
        .arg(dir.path().join("params"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    let params_file = lines.next().unwrap();
    assert_eq!(
        lines.next().unwrap(),
        format!(
            "nextflow run https://github.com/nf-core/rnaseq -resume -r 3.14.0 -params-file {}",
            params_file
        )
    );
    let params: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(params_file).unwrap()).unwrap();
    assert_eq!(params["EMAIL"], "alice@example.org");
}

#[test]
fn test_serve_refuses_reject_policy() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .args(["serve", "--user", "alice", "--bind", "127.0.0.1:0", "--schema"])
        .arg(fixture_path())
        .env("NFPARAMS_MULTI_VALUE_POLICY", "reject")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reject"));
}

#[test]
fn test_launch_command_prints_one_argument_per_line() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .arg("launch-command")
        .env("NXF_USER_WORKFLOW", "nf-core/rnaseq")
        .env("NXF_USER_REVISION", "3.14.0")
        .env("NXF_USER_PARAMS", "/home/alice/.nextflow/abc.json")
        .env_remove("NXF_USER_ENDPOINT")
        .env_remove("NXF_USER_PROFILE")
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "nextflow\nrun\nnf-core/rnaseq\n-resume\n-r\n3.14.0\n-params-file\n/home/alice/.nextflow/abc.json\n",
        ));
}

#[test]
fn test_launch_command_env_output() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .args(["launch-command", "--env"])
        .env("NXF_HOME", "/home/alice/.nextflow")
        .env("NXF_USER_WORKFLOW", "nf-core/rnaseq")
        .env_remove("NXF_USER_REVISION")
        .env_remove("NXF_USER_PARAMS")
        .env_remove("NXF_USER_ENDPOINT")
        .env_remove("NXF_USER_PROFILE")
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "NXF_HOME=/home/alice/.nextflow\nNXF_USER_WORKFLOW=nf-core/rnaseq\n",
        ));
}

#[test]
fn test_launch_command_without_workflow_fails() {
    let dir = TempDir::new().unwrap();
    nfparams(&dir)
        .arg("launch-command")
        .env_remove("NXF_USER_WORKFLOW")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NXF_USER_WORKFLOW"));
}
