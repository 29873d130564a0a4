use std::fs;
use std::path::{Path, PathBuf};

use protofreeze_compiler::Artifacts;

use super::output::{
    ArtifactPaths, MAX_PATH_LEN, ResourceError, base_from_path, write_artifacts,
};

fn artifacts(data: Option<&str>) -> Artifacts {
    Artifacts {
        header: "/* h */\n".to_string(),
        const_header: "/* const */\n".to_string(),
        data: data.map(str::to_string),
    }
}

#[test]
fn paths_derive_from_base() {
    let paths = ArtifactPaths::new("gen/person").unwrap();
    assert_eq!(paths.header, PathBuf::from("gen/person.h"));
    assert_eq!(paths.const_header, PathBuf::from("gen/person_const.h"));
    assert_eq!(paths.data, PathBuf::from("gen/person.c"));
}

#[test]
fn overlong_path_is_rejected() {
    // `BASE.h` fits but `BASE_const.h` does not.
    let base = "a".repeat(MAX_PATH_LEN - 2);
    let err = ArtifactPaths::new(&base).unwrap_err();
    assert!(matches!(err, ResourceError::PathTooLong { max: MAX_PATH_LEN, .. }));
    assert!(err.to_string().ends_with("is longer than 255 bytes"));
}

#[test]
fn path_at_limit_is_accepted() {
    let base = "a".repeat(MAX_PATH_LEN - "_const.h".len());
    assert!(ArtifactPaths::new(&base).is_ok());
}

#[test]
fn writes_headers_only_without_data() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("person");
    let paths = ArtifactPaths::new(&base.to_string_lossy()).unwrap();

    let written = write_artifacts(&paths, &artifacts(None)).unwrap();
    assert_eq!(written, [paths.header.clone(), paths.const_header.clone()]);
    assert_eq!(fs::read_to_string(&paths.header).unwrap(), "/* h */\n");
    assert_eq!(fs::read_to_string(&paths.const_header).unwrap(), "/* const */\n");
    assert!(!paths.data.exists());
}

#[test]
fn writes_all_three_with_data() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("person");
    let paths = ArtifactPaths::new(&base.to_string_lossy()).unwrap();

    let written = write_artifacts(&paths, &artifacts(Some("int x;\n"))).unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(fs::read_to_string(&paths.data).unwrap(), "int x;\n");
}

#[test]
fn write_failure_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("missing-dir").join("person");
    let paths = ArtifactPaths::new(&base.to_string_lossy()).unwrap();

    let err = write_artifacts(&paths, &artifacts(None)).unwrap_err();
    assert!(matches!(err, ResourceError::Write { .. }));
    assert!(err.to_string().contains("person.h"), "{err}");
}

#[test]
fn base_strips_extension() {
    assert_eq!(base_from_path(Path::new("data/db.json")), "data/db");
    assert_eq!(base_from_path(Path::new("schema")), "schema");
}
