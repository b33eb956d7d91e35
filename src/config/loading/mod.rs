use std::{fs, path::Path};

use tracing::debug;

use super::BridgeConfig;
use crate::{BridgeError, Result};

impl BridgeConfig {
    /// Parses a configuration from TOML text and validates it.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::TomlParseError` if the text is not valid TOML for
    /// this schema, or `BridgeError::ConfigValidation` if a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BridgeConfig =
            toml::from_str(content).map_err(|e| BridgeError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is invalid
    /// - A value fails validation
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading bridge configuration from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| BridgeError::IoError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let config: BridgeConfig =
            toml::from_str(&content).map_err(|e| BridgeError::toml_parse(e, Some(path)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the bridge relies on.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::ConfigValidation` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.identity.trim().is_empty() {
            return Err(BridgeError::ConfigValidation {
                field: "identity",
                details: "must not be empty".to_string(),
            });
        }

        for (field, value) in [
            ("default_rate", self.default_rate),
            ("minimum_rate", self.minimum_rate),
            ("maximum_rate", self.maximum_rate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BridgeError::ConfigValidation {
                    field,
                    details: format!("must be a positive number, got {value}"),
                });
            }
        }

        if self.minimum_rate > 1.0 {
            return Err(BridgeError::ConfigValidation {
                field: "minimum_rate",
                details: format!("must not exceed 1.0, got {}", self.minimum_rate),
            });
        }

        if self.maximum_rate < 1.0 {
            return Err(BridgeError::ConfigValidation {
                field: "maximum_rate",
                details: format!("must be at least 1.0, got {}", self.maximum_rate),
            });
        }

        if self.default_rate < self.minimum_rate || self.default_rate > self.maximum_rate {
            return Err(BridgeError::ConfigValidation {
                field: "default_rate",
                details: format!(
                    "{} is outside [{}, {}]",
                    self.default_rate, self.minimum_rate, self.maximum_rate
                ),
            });
        }

        Ok(())
    }
}
