use std::sync::Arc;

use super::unknown_property;
use crate::Result;
use crate::config::BridgeConfig;
use crate::services::mpris::{
    ActivePlaylist, EventDispatcher, Interface, PlaylistEntry, PlaylistId, PlaylistOrdering,
    PlaylistsAdapter, PropertyValue, error::AdapterResultExt, properties::playlists,
};

const ACTIVE_PLAYLIST_CHANGED: &[&str] = &[playlists::ACTIVE_PLAYLIST];

/// Playlist listing and activation.
#[derive(Clone)]
pub struct PlaylistsSurface {
    adapter: Arc<dyn PlaylistsAdapter>,
    config: Arc<BridgeConfig>,
    dispatcher: EventDispatcher,
}

impl PlaylistsSurface {
    pub(crate) fn new(
        adapter: Arc<dyn PlaylistsAdapter>,
        config: Arc<BridgeConfig>,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            adapter,
            config,
            dispatcher,
        }
    }

    /// Start playing the given playlist.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn activate_playlist(&self, id: &PlaylistId) -> Result<()> {
        if self
            .adapter
            .activate_playlist(id)
            .implemented("activate_playlist")?
            .is_some()
        {
            self.dispatcher
                .refresh(Interface::Playlists, ACTIVE_PLAYLIST_CHANGED)?;
        }
        Ok(())
    }

    /// One page of playlists in the requested order.
    ///
    /// The full listing is sorted ascending by `order`, reversed as a whole
    /// when `reverse` is set, then paged. An `index` past the end yields an
    /// empty page.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidEnum` for an unknown ordering tag, or
    /// `BridgeError::Adapter` if the host fails.
    pub fn get_playlists(
        &self,
        index: u32,
        max_count: u32,
        order: &str,
        reverse: bool,
    ) -> Result<Vec<PlaylistEntry>> {
        let ordering: PlaylistOrdering = order.parse()?;

        let mut entries = self.all_playlists()?;
        ordering.sort(&mut entries);
        if reverse {
            entries.reverse();
        }

        Ok(entries
            .into_iter()
            .skip(index as usize)
            .take(max_count as usize)
            .collect())
    }

    fn all_playlists(&self) -> Result<Vec<PlaylistEntry>> {
        self.adapter.playlists().or_fallback("playlists", Vec::new())
    }

    /// Number of playlists, counting the listing when the host has no count.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn playlist_count(&self) -> Result<u32> {
        if let Some(count) = self.adapter.playlist_count().implemented("playlist_count")? {
            return Ok(count);
        }
        Ok(u32::try_from(self.all_playlists()?.len()).unwrap_or(u32::MAX))
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn orderings(&self) -> Result<Vec<PlaylistOrdering>> {
        self.adapter
            .orderings()
            .or_fallback_with("orderings", || self.config.orderings.clone())
    }

    /// The active playlist, flagged invalid when there is none.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn active_playlist(&self) -> Result<ActivePlaylist> {
        Ok(self
            .adapter
            .active_playlist()
            .or_fallback("active_playlist", None)?
            .into())
    }

    pub(crate) fn property(&self, name: &str) -> Result<PropertyValue> {
        Ok(match name {
            playlists::PLAYLIST_COUNT => self.playlist_count()?.into(),
            playlists::ORDERINGS => self
                .orderings()?
                .into_iter()
                .map(|ordering| ordering.as_str().to_string())
                .collect::<Vec<_>>()
                .into(),
            playlists::ACTIVE_PLAYLIST => self.active_playlist()?.into(),
            _ => return Err(unknown_property(Interface::Playlists, name)),
        })
    }
}
