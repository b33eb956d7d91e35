//! Protocol-facing behavior of the four interfaces.
//!
//! Surfaces sit between the wire and the host adapters. They apply capability
//! gates, fallbacks, and value validation, and they are what the notifier reads
//! when it diffs properties.

mod player;
mod playlists;
mod root;
mod track_list;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::debug;

pub use player::PlayerSurface;
pub use playlists::PlaylistsSurface;
pub use root::RootSurface;
pub use track_list::TrackListSurface;

use super::{
    Adapters, EventDispatcher, Interface, Metadata, PlayerAdapter, PropertySource, PropertyValue,
    Track, TrackId, error::AdapterResultExt, metadata,
};
use crate::config::BridgeConfig;
use crate::{BridgeError, Result};

/// Logs a call ignored because its capability predicate is false.
fn capability_denied(operation: &'static str) {
    debug!(operation, "Capability is false, ignoring call");
}

/// Builds metadata for `track`, asking `player` for artwork the track lacks.
fn build_metadata(track: Option<&Track>, player: &dyn PlayerAdapter) -> Result<Metadata> {
    let mut art_error = None;
    let built = metadata::build(track, None, |track_no| {
        match player.art_url(track_no).or_fallback("art_url", None) {
            Ok(url) => url,
            Err(e) => {
                art_error = Some(e);
                None
            }
        }
    });

    match art_error {
        Some(e) => Err(e),
        None => Ok(built),
    }
}

fn unknown_property(interface: Interface, name: &str) -> BridgeError {
    BridgeError::UnknownProperty {
        interface: interface.name(),
        property: name.to_string(),
    }
}

/// Every surface a bridge serves.
#[derive(Clone)]
pub struct Surfaces {
    /// `org.mpris.MediaPlayer2`
    pub root: RootSurface,
    /// `org.mpris.MediaPlayer2.Player`
    pub player: PlayerSurface,
    /// `org.mpris.MediaPlayer2.Playlists`, when the host supports playlists
    pub playlists: Option<PlaylistsSurface>,
    /// `org.mpris.MediaPlayer2.TrackList`, when the host exposes its queue
    pub track_list: Option<TrackListSurface>,
}

impl Surfaces {
    pub(crate) fn new(
        adapters: Adapters,
        config: Arc<BridgeConfig>,
        dispatcher: EventDispatcher,
    ) -> Self {
        let has_track_list = adapters.track_list.is_some();

        Self {
            root: RootSurface::new(
                adapters.root,
                Arc::clone(&config),
                dispatcher.clone(),
                has_track_list,
            ),
            player: PlayerSurface::new(
                Arc::clone(&adapters.player),
                Arc::clone(&config),
                dispatcher.clone(),
            ),
            playlists: adapters.playlists.map(|adapter| {
                PlaylistsSurface::new(adapter, Arc::clone(&config), dispatcher.clone())
            }),
            track_list: adapters
                .track_list
                .map(|adapter| TrackListSurface::new(adapter, adapters.player, dispatcher)),
        }
    }
}

impl PropertySource for Surfaces {
    fn property(&self, interface: Interface, name: &str) -> Result<PropertyValue> {
        match interface {
            Interface::Root => self.root.property(name),
            Interface::Player => self.player.property(name),
            Interface::Playlists => self
                .playlists
                .as_ref()
                .ok_or_else(|| unknown_property(interface, name))?
                .property(name),
            Interface::TrackList => self
                .track_list
                .as_ref()
                .ok_or_else(|| unknown_property(interface, name))?
                .property(name),
        }
    }

    fn track_metadata(&self, track: &TrackId) -> Result<Option<Metadata>> {
        match &self.track_list {
            Some(track_list) => track_list.metadata_for(track),
            None => Ok(None),
        }
    }
}
