//! Unit tests for config module
//!
//! Tests configuration defaults, TOML parsing, and validation.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]

use crate::BridgeError;
use crate::config::BridgeConfig;
use crate::services::mpris::PlaylistOrdering;

#[test]
fn config_default_is_valid() {
    let config = BridgeConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.default_rate, 1.0);
    assert!(config.supported_uri_schemes.contains(&"file".to_string()));
}

#[test]
fn config_minimal_toml() {
    let config = BridgeConfig::from_toml_str("").unwrap();

    assert_eq!(config, BridgeConfig::default());
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        identity = "Jukebox"
        desktop_entry = "jukebox"
        supported_uri_schemes = ["file", "http"]
        minimum_rate = 0.5
        maximum_rate = 2.0
        orderings = ["Alphabetical", "CreationDate", "LastPlayDate"]
    "#;

    let config = BridgeConfig::from_toml_str(toml_str).unwrap();

    assert_eq!(config.identity, "Jukebox");
    assert_eq!(config.desktop_entry, "jukebox");
    assert_eq!(config.supported_uri_schemes, vec!["file", "http"]);
    assert_eq!(config.minimum_rate, 0.5);
    assert_eq!(config.maximum_rate, 2.0);
    assert_eq!(
        config.orderings,
        vec![
            PlaylistOrdering::Alphabetical,
            PlaylistOrdering::CreationDate,
            PlaylistOrdering::LastPlayDate,
        ]
    );
}

#[test]
fn config_rejects_unknown_ordering() {
    let result = BridgeConfig::from_toml_str(r#"orderings = ["Random"]"#);

    assert!(matches!(result, Err(BridgeError::TomlParseError { .. })));
}

#[test]
fn config_rejects_empty_identity() {
    let result = BridgeConfig::from_toml_str(r#"identity = "  ""#);

    match result {
        Err(BridgeError::ConfigValidation { field, .. }) => assert_eq!(field, "identity"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn config_rejects_rate_bounds_excluding_normal_speed() {
    let result = BridgeConfig::from_toml_str("minimum_rate = 1.5\nmaximum_rate = 2.0");

    match result {
        Err(BridgeError::ConfigValidation { field, .. }) => assert_eq!(field, "minimum_rate"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn config_rejects_default_rate_outside_bounds() {
    let result = BridgeConfig::from_toml_str("default_rate = 3.0\nmaximum_rate = 2.0");

    match result {
        Err(BridgeError::ConfigValidation { field, .. }) => assert_eq!(field, "default_rate"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn config_serialize_roundtrip() {
    let original = BridgeConfig::with_identity("Roundtrip");

    let toml_str = toml::to_string(&original).unwrap();
    let parsed = BridgeConfig::from_toml_str(&toml_str).unwrap();

    assert_eq!(original, parsed);
}
