use std::sync::Arc;

use tracing::debug;

use super::{build_metadata, capability_denied, unknown_property};
use crate::Result;
use crate::services::mpris::{
    EventDispatcher, InsertPosition, Interface, Metadata, PlayerAdapter, PropertyValue, TrackId,
    TrackListAdapter, error::AdapterResultExt, properties::track_list,
};

/// The play queue.
///
/// Adding and removing tracks is gated by `CanEditTracks`; reading metadata
/// and jumping to a track are always allowed.
#[derive(Clone)]
pub struct TrackListSurface {
    adapter: Arc<dyn TrackListAdapter>,
    player: Arc<dyn PlayerAdapter>,
    dispatcher: EventDispatcher,
}

impl TrackListSurface {
    pub(crate) fn new(
        adapter: Arc<dyn TrackListAdapter>,
        player: Arc<dyn PlayerAdapter>,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            adapter,
            player,
            dispatcher,
        }
    }

    /// Metadata for each known id, in request order. Unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn get_tracks_metadata(&self, ids: &[TrackId]) -> Result<Vec<Metadata>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            match self.metadata_for(id)? {
                Some(metadata) => found.push(metadata),
                None => debug!(track = %id, "Skipping metadata for unknown track"),
            }
        }
        Ok(found)
    }

    pub(crate) fn metadata_for(&self, id: &TrackId) -> Result<Option<Metadata>> {
        if let Some(overridden) = self.adapter.track_metadata(id).implemented("track_metadata")? {
            return Ok(Some(overridden));
        }

        match self.adapter.track(id).or_fallback("track", None)? {
            Some(track) => build_metadata(Some(&track), self.player.as_ref()).map(Some),
            None => Ok(None),
        }
    }

    /// Queue `uri` after `after`, or at the head for the "no track" id.
    ///
    /// Emits `TrackAdded` once the host confirms the insertion.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn add_track(&self, uri: &str, after: TrackId, set_as_current: bool) -> Result<()> {
        if !self.can_edit_tracks()? {
            capability_denied("AddTrack");
            return Ok(());
        }

        let position = InsertPosition::from(after.clone());
        if let Some(track) = self
            .adapter
            .add_track(uri, position, set_as_current)
            .implemented("add_track")?
        {
            self.dispatcher.track_added(track, after)?;
        }
        Ok(())
    }

    /// Remove a track. Emits `TrackRemoved` once the host confirms.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn remove_track(&self, id: &TrackId) -> Result<()> {
        if !self.can_edit_tracks()? {
            capability_denied("RemoveTrack");
            return Ok(());
        }

        if self
            .adapter
            .remove_track(id)
            .implemented("remove_track")?
            .is_some()
        {
            self.dispatcher.track_removed(id.clone())?;
        }
        Ok(())
    }

    /// Skip to a queued track.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn go_to(&self, id: &TrackId) -> Result<()> {
        self.adapter.go_to(id).implemented("go_to")?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn tracks(&self) -> Result<Vec<TrackId>> {
        self.adapter.tracks().or_fallback("tracks", Vec::new())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_edit_tracks(&self) -> Result<bool> {
        self.adapter
            .can_edit_tracks()
            .or_fallback("can_edit_tracks", false)
    }

    pub(crate) fn property(&self, name: &str) -> Result<PropertyValue> {
        Ok(match name {
            track_list::TRACKS => self.tracks()?.into(),
            track_list::CAN_EDIT_TRACKS => self.can_edit_tracks()?.into(),
            _ => return Err(unknown_property(Interface::TrackList, name)),
        })
    }
}
