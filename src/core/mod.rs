use std::path::Path;

use thiserror::Error;

use crate::services::mpris::AdapterError;

/// Error types for the MPRIS host bridge.
///
/// Covers configuration loading, values rejected at the protocol boundary,
/// host adapter faults, and D-Bus transport failures.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Host adapter code failed while the bridge delegated to it
    #[error("adapter call '{operation}' failed: {source}")]
    Adapter {
        /// Adapter operation that failed
        operation: &'static str,
        /// Failure reported by the host
        #[source]
        source: AdapterError,
    },

    /// Value outside the domain of the property it was written to
    #[error("invalid value for '{property}': {reason}")]
    InvalidValue {
        /// Property that rejected the value
        property: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// String tag outside a closed enumeration
    #[error("'{value}' is not a valid {kind}")]
    InvalidEnum {
        /// Enumeration being parsed
        kind: &'static str,
        /// Rejected tag
        value: String,
    },

    /// String that does not satisfy the object path grammar
    #[error("'{0}' is not a valid object path")]
    InvalidObjectPath(String),

    /// Property name not exposed by an interface
    #[error("interface '{interface}' has no property '{property}'")]
    UnknownProperty {
        /// Interface that was queried
        interface: &'static str,
        /// Requested property name
        property: String,
    },

    /// Value could not be converted to its wire representation
    #[error("failed to marshal value: {0}")]
    Marshalling(#[from] zbus::zvariant::Error),

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    Dbus(#[from] zbus::Error),

    /// The notifier worker is gone and no longer accepts events
    #[error("event dispatcher is no longer running")]
    DispatcherClosed,

    /// Configuration validation error
    #[error("configuration validation failed for '{field}': {details}")]
    ConfigValidation {
        /// Field that failed validation
        field: &'static str,
        /// Validation error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: std::path::PathBuf,
        /// I/O error details
        details: String,
    },
}

/// A specialized `Result` type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

impl BridgeError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        BridgeError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an error for a value outside its property's domain.
    pub fn invalid_value(property: &'static str, reason: impl Into<String>) -> Self {
        BridgeError::InvalidValue {
            property,
            reason: reason.into(),
        }
    }

    /// Creates an error for an unrecognized enumeration tag.
    pub fn invalid_enum(kind: &'static str, value: impl Into<String>) -> Self {
        BridgeError::InvalidEnum {
            kind,
            value: value.into(),
        }
    }

    /// Whether the error was caused by the caller supplying a bad argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            BridgeError::InvalidValue { .. }
                | BridgeError::InvalidEnum { .. }
                | BridgeError::InvalidObjectPath(_)
        )
    }
}

impl From<BridgeError> for zbus::fdo::Error {
    fn from(error: BridgeError) -> Self {
        if error.is_invalid_argument() {
            zbus::fdo::Error::InvalidArgs(error.to_string())
        } else {
            zbus::fdo::Error::Failed(error.to_string())
        }
    }
}
