use std::collections::HashMap;

use zbus::{
    fdo,
    object_server::SignalEmitter,
    zvariant::{ObjectPath, OwnedObjectPath, OwnedValue},
};

use crate::BridgeError;
use crate::services::mpris::{
    PlayerSurface, PlaylistId, PlaylistTuple, PlaylistsSurface, RootSurface, TrackId,
    TrackListSurface,
};

fn setter_error(error: BridgeError) -> zbus::Error {
    zbus::Error::from(fdo::Error::from(error))
}

/// `org.mpris.MediaPlayer2` object.
pub struct RootInterface {
    surface: RootSurface,
}

impl RootInterface {
    /// Serve `surface` on the bus.
    pub fn new(surface: RootSurface) -> Self {
        Self { surface }
    }
}

#[zbus::interface(name = "org.mpris.MediaPlayer2")]
impl RootInterface {
    fn raise(&self) -> fdo::Result<()> {
        Ok(self.surface.raise()?)
    }

    fn quit(&self) -> fdo::Result<()> {
        Ok(self.surface.quit()?)
    }

    #[zbus(property)]
    fn can_quit(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_quit()?)
    }

    #[zbus(property)]
    fn can_raise(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_raise()?)
    }

    #[zbus(property(emits_changed_signal = "false"))]
    fn fullscreen(&self) -> fdo::Result<bool> {
        Ok(self.surface.fullscreen()?)
    }

    #[zbus(property)]
    fn set_fullscreen(&self, fullscreen: bool) -> zbus::Result<()> {
        self.surface.set_fullscreen(fullscreen).map_err(setter_error)
    }

    #[zbus(property)]
    fn can_set_fullscreen(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_set_fullscreen()?)
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        self.surface.has_track_list()
    }

    #[zbus(property)]
    fn identity(&self) -> String {
        self.surface.identity()
    }

    #[zbus(property)]
    fn desktop_entry(&self) -> fdo::Result<String> {
        Ok(self.surface.desktop_entry()?)
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> fdo::Result<Vec<String>> {
        Ok(self.surface.supported_uri_schemes()?)
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> fdo::Result<Vec<String>> {
        Ok(self.surface.supported_mime_types()?)
    }
}

/// `org.mpris.MediaPlayer2.Player` object.
pub struct PlayerInterface {
    surface: PlayerSurface,
}

impl PlayerInterface {
    /// Serve `surface` on the bus.
    pub fn new(surface: PlayerSurface) -> Self {
        Self { surface }
    }
}

#[zbus::interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerInterface {
    fn next(&self) -> fdo::Result<()> {
        Ok(self.surface.next()?)
    }

    fn previous(&self) -> fdo::Result<()> {
        Ok(self.surface.previous()?)
    }

    fn pause(&self) -> fdo::Result<()> {
        Ok(self.surface.pause()?)
    }

    fn play_pause(&self) -> fdo::Result<()> {
        Ok(self.surface.play_pause()?)
    }

    fn stop(&self) -> fdo::Result<()> {
        Ok(self.surface.stop()?)
    }

    fn play(&self) -> fdo::Result<()> {
        Ok(self.surface.play()?)
    }

    fn seek(&self, offset: i64) -> fdo::Result<()> {
        Ok(self.surface.seek(offset)?)
    }

    fn set_position(&self, track_id: OwnedObjectPath, position: i64) -> fdo::Result<()> {
        Ok(self.surface.set_position(&TrackId::from(track_id), position)?)
    }

    fn open_uri(&self, uri: String) -> fdo::Result<()> {
        Ok(self.surface.open_uri(&uri)?)
    }

    /// Playback position jumped.
    #[zbus(signal)]
    pub async fn seeked(emitter: &SignalEmitter<'_>, position: i64) -> zbus::Result<()>;

    #[zbus(property)]
    fn playback_status(&self) -> fdo::Result<String> {
        Ok(self.surface.playback_status()?.as_str().to_string())
    }

    #[zbus(property(emits_changed_signal = "false"))]
    fn loop_status(&self) -> fdo::Result<String> {
        Ok(self.surface.loop_status()?.as_str().to_string())
    }

    #[zbus(property)]
    fn set_loop_status(&self, status: String) -> zbus::Result<()> {
        self.surface.set_loop_status(&status).map_err(setter_error)
    }

    #[zbus(property(emits_changed_signal = "false"))]
    fn rate(&self) -> fdo::Result<f64> {
        Ok(self.surface.rate()?)
    }

    #[zbus(property)]
    fn set_rate(&self, rate: f64) -> zbus::Result<()> {
        self.surface.set_rate(rate).map_err(setter_error)
    }

    #[zbus(property(emits_changed_signal = "false"))]
    fn shuffle(&self) -> fdo::Result<bool> {
        Ok(self.surface.shuffle()?)
    }

    #[zbus(property)]
    fn set_shuffle(&self, shuffle: bool) -> zbus::Result<()> {
        self.surface.set_shuffle(shuffle).map_err(setter_error)
    }

    #[zbus(property)]
    fn metadata(&self) -> fdo::Result<HashMap<String, OwnedValue>> {
        Ok(self.surface.metadata()?.to_dbus()?)
    }

    #[zbus(property(emits_changed_signal = "false"))]
    fn volume(&self) -> fdo::Result<f64> {
        Ok(self.surface.volume()?)
    }

    #[zbus(property)]
    fn set_volume(&self, volume: f64) -> zbus::Result<()> {
        self.surface.set_volume(volume).map_err(setter_error)
    }

    #[zbus(property(emits_changed_signal = "false"))]
    fn position(&self) -> fdo::Result<i64> {
        Ok(self.surface.position()?)
    }

    #[zbus(property)]
    fn minimum_rate(&self) -> f64 {
        self.surface.minimum_rate()
    }

    #[zbus(property)]
    fn maximum_rate(&self) -> f64 {
        self.surface.maximum_rate()
    }

    #[zbus(property)]
    fn can_go_next(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_go_next()?)
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_go_previous()?)
    }

    #[zbus(property)]
    fn can_play(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_play()?)
    }

    #[zbus(property)]
    fn can_pause(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_pause()?)
    }

    #[zbus(property)]
    fn can_seek(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_seek()?)
    }

    #[zbus(property)]
    fn can_control(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_control()?)
    }
}

/// `org.mpris.MediaPlayer2.Playlists` object.
pub struct PlaylistsInterface {
    surface: PlaylistsSurface,
}

impl PlaylistsInterface {
    /// Serve `surface` on the bus.
    pub fn new(surface: PlaylistsSurface) -> Self {
        Self { surface }
    }
}

#[zbus::interface(name = "org.mpris.MediaPlayer2.Playlists")]
impl PlaylistsInterface {
    fn activate_playlist(&self, playlist_id: OwnedObjectPath) -> fdo::Result<()> {
        Ok(self
            .surface
            .activate_playlist(&PlaylistId::from(playlist_id))?)
    }

    fn get_playlists(
        &self,
        index: u32,
        max_count: u32,
        order: String,
        reverse_order: bool,
    ) -> fdo::Result<Vec<PlaylistTuple>> {
        Ok(self
            .surface
            .get_playlists(index, max_count, &order, reverse_order)?
            .iter()
            .map(|entry| entry.to_tuple())
            .collect())
    }

    /// A playlist's name or icon changed.
    #[zbus(signal)]
    pub async fn playlist_changed(
        emitter: &SignalEmitter<'_>,
        playlist: PlaylistTuple,
    ) -> zbus::Result<()>;

    #[zbus(property)]
    fn playlist_count(&self) -> fdo::Result<u32> {
        Ok(self.surface.playlist_count()?)
    }

    #[zbus(property)]
    fn orderings(&self) -> fdo::Result<Vec<String>> {
        Ok(self
            .surface
            .orderings()?
            .into_iter()
            .map(|ordering| ordering.as_str().to_string())
            .collect())
    }

    #[zbus(property)]
    fn active_playlist(&self) -> fdo::Result<(bool, PlaylistTuple)> {
        Ok(self.surface.active_playlist()?.to_tuple())
    }
}

/// `org.mpris.MediaPlayer2.TrackList` object.
pub struct TrackListInterface {
    surface: TrackListSurface,
}

impl TrackListInterface {
    /// Serve `surface` on the bus.
    pub fn new(surface: TrackListSurface) -> Self {
        Self { surface }
    }
}

#[zbus::interface(name = "org.mpris.MediaPlayer2.TrackList")]
impl TrackListInterface {
    fn get_tracks_metadata(
        &self,
        track_ids: Vec<OwnedObjectPath>,
    ) -> fdo::Result<Vec<HashMap<String, OwnedValue>>> {
        let ids: Vec<TrackId> = track_ids.into_iter().map(TrackId::from).collect();
        self.surface
            .get_tracks_metadata(&ids)?
            .iter()
            .map(|metadata| metadata.to_dbus().map_err(fdo::Error::from))
            .collect()
    }

    fn add_track(
        &self,
        uri: String,
        after_track: OwnedObjectPath,
        set_as_current: bool,
    ) -> fdo::Result<()> {
        Ok(self
            .surface
            .add_track(&uri, TrackId::from(after_track), set_as_current)?)
    }

    fn remove_track(&self, track_id: OwnedObjectPath) -> fdo::Result<()> {
        Ok(self.surface.remove_track(&TrackId::from(track_id))?)
    }

    fn go_to(&self, track_id: OwnedObjectPath) -> fdo::Result<()> {
        Ok(self.surface.go_to(&TrackId::from(track_id))?)
    }

    /// The whole track list was replaced.
    #[zbus(signal)]
    pub async fn track_list_replaced(
        emitter: &SignalEmitter<'_>,
        tracks: Vec<ObjectPath<'_>>,
        current_track: ObjectPath<'_>,
    ) -> zbus::Result<()>;

    /// A track was inserted.
    #[zbus(signal)]
    pub async fn track_added(
        emitter: &SignalEmitter<'_>,
        metadata: HashMap<String, OwnedValue>,
        after_track: ObjectPath<'_>,
    ) -> zbus::Result<()>;

    /// A track was removed.
    #[zbus(signal)]
    pub async fn track_removed(
        emitter: &SignalEmitter<'_>,
        track_id: ObjectPath<'_>,
    ) -> zbus::Result<()>;

    /// Metadata of a queued track changed.
    #[zbus(signal)]
    pub async fn track_metadata_changed(
        emitter: &SignalEmitter<'_>,
        track_id: ObjectPath<'_>,
        metadata: HashMap<String, OwnedValue>,
    ) -> zbus::Result<()>;

    #[zbus(property(emits_changed_signal = "invalidates"))]
    fn tracks(&self) -> fdo::Result<Vec<OwnedObjectPath>> {
        Ok(self
            .surface
            .tracks()?
            .iter()
            .map(TrackId::to_owned_path)
            .collect())
    }

    #[zbus(property)]
    fn can_edit_tracks(&self) -> fdo::Result<bool> {
        Ok(self.surface.can_edit_tracks()?)
    }
}
