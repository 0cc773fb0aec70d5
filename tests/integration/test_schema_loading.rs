use nfparams::core::form::render_all;
use nfparams::core::resolver::{FormResolver, SubmittedForm};
use nfparams::core::schema::{load_schema, read_schema, ParameterSchema, SchemaLayout};
use nfparams::core::types::ErrorCategory;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture_path() -> &'static Path {
    Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/nextflow_schema.json"
    ))
}

#[test]
fn test_fixture_loads_from_disk() {
    let schema = load_schema(fixture_path()).expect("fixture schema");
    assert_eq!(schema.layout(), Some(SchemaLayout::Defs));
    let groups: Vec<&str> = schema.groups().keys().map(String::as_str).collect();
    assert_eq!(
        groups,
        ["input_output_options", "alignment_options", "internal_options"]
    );
}

#[test]
fn test_missing_schema_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("assets/nf-core/rnaseq/nextflow_schema.json");
    assert!(load_schema(&path).is_none());
    assert_eq!(
        read_schema(&path).unwrap_err().category,
        ErrorCategory::NotFoundError
    );
}

#[test]
fn test_schema_without_definitions_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nextflow_schema.json");
    fs::write(&path, r#"{"type": "object", "properties": {"a": {}}}"#).unwrap();

    let err = read_schema(&path).unwrap_err();
    assert_eq!(err.category, ErrorCategory::SchemaError);
    assert!(err.message.contains("no definition groups"));
    assert!(load_schema(&path).is_none());
}

#[test]
fn test_definitions_layout_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nextflow_schema.json");
    fs::write(
        &path,
        r#"{"definitions": {"main": {"properties": {"reads": {"type": "string", "default": "*.fq"}}}}}"#,
    )
    .unwrap();

    let schema = read_schema(&path).unwrap();
    assert_eq!(schema.layout(), Some(SchemaLayout::Definitions));
    assert_eq!(render_all(&schema).len(), 1);
}

#[test]
fn test_empty_schema_gives_empty_form_and_params() {
    let schema = ParameterSchema::empty();
    assert!(schema.is_empty());
    assert!(render_all(&schema).is_empty());

    let form = SubmittedForm::from_pairs([("anything", "goes")]);
    let params = FormResolver::new(&schema).resolve(&form).unwrap();
    assert!(params.is_empty());
}
