use std::fs;
use std::path::Path;

use super::input_loader::{load_instance, load_schema, read_input, resolve_root_type};

const SCHEMA: &str = r#"{
  "messages": [
    { "name": "demo.Config", "fields": [
      { "name": "port", "number": 2, "type": "uint32" },
      { "name": "host", "number": 1, "type": "string" }
    ] },
    { "name": "demo.Other", "fields": [] }
  ]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_schema_in_declaration_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "s.json", SCHEMA);

    let schema = load_schema(&path, false).unwrap();
    let id = schema.message_id("demo.Config").unwrap();
    let names: Vec<_> = schema.message(id).fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["port", "host"]);
}

#[test]
fn sort_fields_reorders_by_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "s.json", SCHEMA);

    let schema = load_schema(&path, true).unwrap();
    let id = schema.message_id("demo.Config").unwrap();
    let names: Vec<_> = schema.message(id).fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["host", "port"]);
}

#[test]
fn invalid_schema_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bad.json", "{ not json");

    let err = load_schema(&path, false).unwrap_err();
    assert!(err.contains("bad.json"), "{err}");
}

#[test]
fn missing_file_is_reported() {
    let err = read_input(Path::new("/nonexistent/protofreeze/s.json")).unwrap_err();
    assert!(err.starts_with("failed to read '/nonexistent/protofreeze/s.json'"), "{err}");
}

#[test]
fn root_type_defaults_to_first_message() {
    let schema = protofreeze_core::Schema::from_json(SCHEMA).unwrap();
    assert_eq!(resolve_root_type(&schema, None).unwrap(), "demo.Config");
    assert_eq!(
        resolve_root_type(&schema, Some("demo.Other")).unwrap(),
        "demo.Other"
    );
}

#[test]
fn unknown_root_type_is_rejected() {
    let schema = protofreeze_core::Schema::from_json(SCHEMA).unwrap();
    let err = resolve_root_type(&schema, Some("demo.Missing")).unwrap_err();
    assert_eq!(err, "unknown root message type `demo.Missing`");
}

#[test]
fn empty_schema_has_no_root_type() {
    let schema = protofreeze_core::Schema::from_json(r#"{ "messages": [] }"#).unwrap();
    assert!(resolve_root_type(&schema, None).is_err());
}

#[test]
fn loads_instance_of_default_root() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = write(dir.path(), "s.json", SCHEMA);
    let instance_path = write(dir.path(), "db.json", r#"{ "host": "localhost", "port": 80 }"#);

    let schema = load_schema(&schema_path, false).unwrap();
    let instance = load_instance(&schema, &instance_path, None).unwrap();
    assert_eq!(instance.root_type(), schema.message_id("demo.Config").unwrap());
    assert_eq!(instance.message_count(), 1);
}

#[test]
fn instance_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = write(dir.path(), "s.json", SCHEMA);
    let instance_path = write(dir.path(), "db.json", r#"{ "colour": "red" }"#);

    let schema = load_schema(&schema_path, false).unwrap();
    let err = load_instance(&schema, &instance_path, None).unwrap_err();
    assert!(err.contains("db.json"), "{err}");
    assert!(err.contains("colour"), "{err}");
}
