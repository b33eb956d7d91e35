use async_trait::async_trait;

use super::PropertyValue;
use crate::Result;
use crate::services::mpris::{Interface, Metadata, PlaylistEntry, TrackId};

/// A signal the bridge emits to remote controllers.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Batched property changes for one interface
    PropertiesChanged {
        /// Interface whose properties changed
        interface: Interface,
        /// Changed properties with their new values
        changed: Vec<(&'static str, PropertyValue)>,
        /// Changed properties announced by name only
        invalidated: Vec<&'static str>,
    },

    /// Playback position jumped, in microseconds
    Seeked(i64),

    /// The whole track list was replaced
    TrackListReplaced {
        /// New track list
        tracks: Vec<TrackId>,
        /// Current track after the replacement
        current: TrackId,
    },

    /// A track was inserted
    TrackAdded {
        /// Metadata of the new track
        metadata: Metadata,
        /// Track the new one follows, or the "no track" sentinel for the head
        after: TrackId,
    },

    /// A track was removed
    TrackRemoved(TrackId),

    /// Metadata of a queued track changed
    TrackMetadataChanged {
        /// Track whose metadata changed
        track: TrackId,
        /// Its new metadata
        metadata: Metadata,
    },

    /// A playlist's name or icon changed
    PlaylistChanged(PlaylistEntry),
}

impl Signal {
    /// Member name on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Signal::PropertiesChanged { .. } => "PropertiesChanged",
            Signal::Seeked(_) => "Seeked",
            Signal::TrackListReplaced { .. } => "TrackListReplaced",
            Signal::TrackAdded { .. } => "TrackAdded",
            Signal::TrackRemoved(_) => "TrackRemoved",
            Signal::TrackMetadataChanged { .. } => "TrackMetadataChanged",
            Signal::PlaylistChanged(_) => "PlaylistChanged",
        }
    }
}

/// Destination for emitted signals.
///
/// Implementations must deliver signals in the order `emit` is called.
#[async_trait]
pub trait SignalSink: Send + Sync {
    /// Deliver one signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal could not be delivered.
    async fn emit(&self, signal: Signal) -> Result<()>;
}
