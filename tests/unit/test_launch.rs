use nfparams::core::launch::{LaunchSpec, ENV_NXF_HOME, ENV_PARAMS, ENV_PROFILE, ENV_WORKFLOW};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn full_spec() -> LaunchSpec {
    LaunchSpec::new("https://github.com/nf-core/rnaseq")
        .with_revision(Some("3.14.0".to_string()))
        .with_params_file(Some(PathBuf::from("/home/alice/.nextflow/abc.json")))
        .with_log_endpoint(Some("http://weblog:8080".to_string()))
        .with_profile(Some("docker,test".to_string()))
}

#[test]
fn command_line_orders_options() {
    insta::assert_snapshot!(
        full_spec().command_line().join(" "),
        @"nextflow run https://github.com/nf-core/rnaseq -resume -r 3.14.0 -params-file /home/alice/.nextflow/abc.json -with-weblog http://weblog:8080 -profile docker,test"
    );
}

#[test]
fn environment_omits_absent_values() {
    let spec = LaunchSpec::new("nf-core/rnaseq");
    let env = spec.environment(Path::new("/srv/nextflow"));
    assert_eq!(env.len(), 2);
    assert_eq!(env[ENV_NXF_HOME], "/srv/nextflow");
    assert_eq!(env[ENV_WORKFLOW], "nf-core/rnaseq");
}

#[test]
fn environment_round_trips_through_from_env() {
    let spec = full_spec();
    let env: HashMap<String, String> = spec
        .environment(Path::new("/srv/nextflow"))
        .into_iter()
        .collect();
    assert_eq!(env[ENV_PARAMS], "/home/alice/.nextflow/abc.json");
    assert_eq!(env[ENV_PROFILE], "docker,test");

    let rebuilt = LaunchSpec::from_env(|key| env.get(key).cloned()).unwrap();
    assert_eq!(rebuilt, spec);
}

#[test]
fn from_env_requires_workflow() {
    assert!(LaunchSpec::from_env(|_| None).is_none());
    assert!(LaunchSpec::from_env(|key| (key == ENV_WORKFLOW).then(String::new)).is_none());
}
