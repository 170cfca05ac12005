// tests/config_test.rs
use repo_version::config::{load_config, Config};
use repo_version::VersionError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[scan]
marker = ".hg"
include_hidden = true

[tag]
message = "Release {tag}"

[display]
date_format = "%d/%m/%Y"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.scan.marker, ".hg");
    assert!(config.scan.include_hidden);
    assert_eq!(config.tag.message, "Release {tag}");
    assert_eq!(config.display.date_format, "%d/%m/%Y");
}

#[test]
fn test_load_partial_file_keeps_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[tag]\nmessage = \"Tagged {tag}\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    let defaults = Config::default();
    assert_eq!(config.tag.message, "Tagged {tag}");
    assert_eq!(config.scan, defaults.scan);
    assert_eq!(config.display, defaults.display);
}

#[test]
fn test_invalid_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[scan\nmarker = 1\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    assert!(matches!(err, VersionError::Config(_)));
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, VersionError::Config(_)));
}
