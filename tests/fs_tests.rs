use oaslint::fs::{FileSystem, OsFileSystem};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_read_to_string() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("api.yaml");
    fs::write(&file_path, "openapi: 3.0.0\n").unwrap();

    let content = OsFileSystem.read_to_string(&file_path).unwrap();
    assert_eq!(content, "openapi: 3.0.0\n");
}

#[test]
fn test_read_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = OsFileSystem
        .read_to_string(&temp_dir.path().join("missing.yaml"))
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_is_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("api.yaml");
    fs::write(&file_path, "").unwrap();

    assert!(OsFileSystem.is_file(&file_path));
    assert!(!OsFileSystem.is_file(temp_dir.path()));
    assert!(!OsFileSystem.is_file(&temp_dir.path().join("nope")));
}
