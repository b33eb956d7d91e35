//! Loading bridge configuration from disk.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::fs;

use mpris_host::{BridgeError, config::BridgeConfig, services::mpris::PlaylistOrdering};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_partial_config_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
identity = "Jukebox"
orderings = ["UserDefined"]
"#,
    );

    let config = BridgeConfig::load(&path).unwrap();

    assert_eq!(config.identity, "Jukebox");
    assert_eq!(config.orderings, vec![PlaylistOrdering::UserDefined]);
    assert_eq!(
        config.supported_uri_schemes,
        BridgeConfig::default().supported_uri_schemes
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();

    let result = BridgeConfig::load(&dir.path().join("absent.toml"));

    assert!(matches!(result, Err(BridgeError::IoError { .. })));
}

#[test]
fn parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "identity = [");

    match BridgeConfig::load(&path) {
        Err(BridgeError::TomlParseError { location, .. }) => {
            assert!(location.ends_with("config.toml"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "maximum_rate = 0.5");

    let result = BridgeConfig::load(&path);

    assert!(matches!(
        result,
        Err(BridgeError::ConfigValidation {
            field: "maximum_rate",
            ..
        })
    ));
}
