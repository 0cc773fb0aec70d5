use nfparams::core::params_file::ParamsFileWriter;
use nfparams::core::resolver::{FormResolver, ResolvedParams, SubmittedForm};
use nfparams::core::schema::ParameterSchema;
use nfparams::utils::serialization::compute_sha256_hex;
use serde_json::{json, Map, Value};
use std::fs;
use tempfile::TempDir;

fn params(pairs: &[(&str, Value)]) -> ResolvedParams {
    let mut map = Map::new();
    for (name, value) in pairs {
        map.insert(name.to_string(), value.clone());
    }
    ResolvedParams::new(map)
}

#[test]
fn identical_mappings_share_one_file() {
    let dir = TempDir::new().unwrap();
    let writer = ParamsFileWriter::new(dir.path());

    let first = writer
        .write(&params(&[("threads", json!(4)), ("outdir", json!("results"))]))
        .unwrap();
    let second = writer
        .write(&params(&[("outdir", json!("results")), ("threads", json!(4))]))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn different_mappings_get_different_files() {
    let dir = TempDir::new().unwrap();
    let writer = ParamsFileWriter::new(dir.path());
    let first = writer.write(&params(&[("threads", json!(4))])).unwrap();
    let second = writer.write(&params(&[("threads", json!(5))])).unwrap();
    assert_ne!(first, second);
}

#[test]
fn file_name_is_digest_of_content() {
    let dir = TempDir::new().unwrap();
    let writer = ParamsFileWriter::new(dir.path().join("params"));
    let path = writer
        .write(&params(&[("nested", json!({"b": 1, "a": [2, 1]}))]))
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, r#"{"nested":{"a":[2,1],"b":1}}"#);
    let stem = path.file_stem().unwrap().to_string_lossy().to_string();
    assert_eq!(stem, compute_sha256_hex(content.as_bytes()));
    assert_eq!(path.extension().unwrap(), "json");
}

#[test]
fn resolved_submission_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let schema =
        ParameterSchema::parse(include_str!("../fixtures/nextflow_schema.json")).unwrap();
    let resolved = FormResolver::new(&schema)
        .resolve(&SubmittedForm::from_pairs([("threads", "8")]))
        .unwrap();

    let path = ParamsFileWriter::new(dir.path()).write(&resolved).unwrap();
    let on_disk: ResolvedParams =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(on_disk.get("threads"), Some(&json!(8)));
    assert_eq!(on_disk.len(), resolved.len());
}
