//! Bridge configuration.
//!
//! Static values the bridge exposes on behalf of the host: identity strings,
//! supported URI schemes and MIME types, rate bounds, and playlist orderings.
//! The configuration is validated once and stays immutable afterwards.

mod loading;
mod paths;

#[cfg(test)]
mod tests;

pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::mpris::PlaylistOrdering;

/// Configuration handed to the bridge at construction.
///
/// Adapter methods that report the same information take precedence; these
/// values are the fallback when the host leaves them unimplemented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BridgeConfig {
    /// Human-readable player name exposed as `Identity`.
    pub identity: String,

    /// Basename of the player's `.desktop` file, without extension.
    pub desktop_entry: String,

    /// URI schemes the player can open, e.g. `file`.
    pub supported_uri_schemes: Vec<String>,

    /// MIME types the player can play.
    pub supported_mime_types: Vec<String>,

    /// Rate reported when the host does not report one.
    pub default_rate: f64,

    /// Lowest playback rate accepted from remote callers.
    pub minimum_rate: f64,

    /// Highest playback rate accepted from remote callers.
    pub maximum_rate: f64,

    /// Playlist orderings reported when the host does not report its own.
    pub orderings: Vec<PlaylistOrdering>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            identity: "MPRIS Host".to_string(),
            desktop_entry: String::new(),
            supported_uri_schemes: vec!["file".to_string()],
            supported_mime_types: vec![
                "audio/mpeg".to_string(),
                "audio/flac".to_string(),
                "audio/ogg".to_string(),
                "audio/x-wav".to_string(),
            ],
            default_rate: 1.0,
            minimum_rate: 1.0,
            maximum_rate: 1.0,
            orderings: vec![PlaylistOrdering::Alphabetical, PlaylistOrdering::UserDefined],
        }
    }
}

impl BridgeConfig {
    /// Creates the default configuration with a custom identity.
    pub fn with_identity(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }
}
