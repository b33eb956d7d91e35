//! Capability traits a host implements to be exposed over MPRIS.
//!
//! Every method has a default body returning `AdapterError::Unimplemented`.
//! The bridge, not the trait, decides what an unimplemented method means:
//! getters fall back to the documented default (false, empty, zero, or the
//! configured value) and mutators become silent no-ops.

use std::sync::Arc;

use super::{
    AdapterError, AdapterResult, LoopStatus, Metadata, PlayState, PlaylistEntry, PlaylistId,
    PlaylistOrdering, Track, TrackId,
};

/// Where a new track goes in the track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertPosition {
    /// At the start of the list
    Head,

    /// Immediately after the given track
    After(TrackId),
}

impl From<TrackId> for InsertPosition {
    fn from(after: TrackId) -> Self {
        if after.is_no_track() {
            InsertPosition::Head
        } else {
            InsertPosition::After(after)
        }
    }
}

/// Application-level controls (`org.mpris.MediaPlayer2`).
#[allow(unused_variables)]
pub trait RootAdapter: Send + Sync {
    /// Whether `quit` does anything. Default: false.
    fn can_quit(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Exit the application.
    fn quit(&self) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether `raise` does anything. Default: false.
    fn can_raise(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Bring the application window to the front.
    fn raise(&self) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether the window is fullscreen. Default: false.
    fn fullscreen(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether `set_fullscreen` does anything. Default: false.
    fn can_set_fullscreen(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Enter or leave fullscreen.
    fn set_fullscreen(&self, fullscreen: bool) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Desktop entry basename. Default: the configured value.
    fn desktop_entry(&self) -> AdapterResult<String> {
        Err(AdapterError::Unimplemented)
    }

    /// URI schemes the player opens. Default: the configured list.
    fn uri_schemes(&self) -> AdapterResult<Vec<String>> {
        Err(AdapterError::Unimplemented)
    }

    /// MIME types the player plays. Default: the configured list.
    fn mime_types(&self) -> AdapterResult<Vec<String>> {
        Err(AdapterError::Unimplemented)
    }
}

/// Playback state and transport controls (`org.mpris.MediaPlayer2.Player`).
#[allow(unused_variables)]
pub trait PlayerAdapter: Send + Sync {
    /// Complete metadata for the current track.
    ///
    /// When implemented, the map is exposed verbatim and `current_track` is
    /// never consulted for metadata.
    fn metadata(&self) -> AdapterResult<Metadata> {
        Err(AdapterError::Unimplemented)
    }

    /// The track currently loaded, if any. Default: none.
    fn current_track(&self) -> AdapterResult<Option<Track>> {
        Err(AdapterError::Unimplemented)
    }

    /// Artwork for the track with the given album position. Default: none.
    fn art_url(&self, track_no: Option<u32>) -> AdapterResult<Option<String>> {
        Err(AdapterError::Unimplemented)
    }

    /// Playback position in microseconds. Default: 0.
    fn position(&self) -> AdapterResult<i64> {
        Err(AdapterError::Unimplemented)
    }

    /// Current playback state. Default: stopped.
    fn playback_status(&self) -> AdapterResult<PlayState> {
        Err(AdapterError::Unimplemented)
    }

    /// Skip to the next track.
    fn next(&self) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Go back to the previous track.
    fn previous(&self) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Pause playback.
    fn pause(&self) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Resume paused playback. Unimplemented falls back to `play`.
    fn resume(&self) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Stop playback.
    fn stop(&self) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Start playback.
    fn play(&self) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Jump to an absolute position in microseconds.
    fn seek(&self, position: i64) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Open and play a URI.
    fn open_uri(&self, uri: &str) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Current loop mode. Default: none.
    fn loop_status(&self) -> AdapterResult<LoopStatus> {
        Err(AdapterError::Unimplemented)
    }

    /// Change the loop mode.
    fn set_loop_status(&self, status: LoopStatus) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Current playback rate. Default: the configured default rate.
    fn rate(&self) -> AdapterResult<f64> {
        Err(AdapterError::Unimplemented)
    }

    /// Change the playback rate.
    fn set_rate(&self, rate: f64) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether shuffle is on. Default: false.
    fn shuffle(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Turn shuffle on or off.
    fn set_shuffle(&self, shuffle: bool) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Current volume, 1.0 being full. Default: 1.0.
    fn volume(&self) -> AdapterResult<f64> {
        Err(AdapterError::Unimplemented)
    }

    /// Change the volume.
    fn set_volume(&self, volume: f64) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether output is muted. Default: false.
    fn is_mute(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Mute or unmute output.
    fn set_mute(&self, mute: bool) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether `next` does anything. Default: false.
    fn can_go_next(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether `previous` does anything. Default: false.
    fn can_go_previous(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether playback can start. Default: false.
    fn can_play(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether playback can pause. Default: false.
    fn can_pause(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether seeking is supported. Default: false.
    fn can_seek(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether the player accepts remote control at all. Default: false.
    fn can_control(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }
}

/// Playlist browsing (`org.mpris.MediaPlayer2.Playlists`).
#[allow(unused_variables)]
pub trait PlaylistsAdapter: Send + Sync {
    /// Every playlist, in the host's own order. Default: empty.
    fn playlists(&self) -> AdapterResult<Vec<PlaylistEntry>> {
        Err(AdapterError::Unimplemented)
    }

    /// Number of playlists. Default: the length of `playlists`.
    fn playlist_count(&self) -> AdapterResult<u32> {
        Err(AdapterError::Unimplemented)
    }

    /// Supported orderings. Default: the configured list.
    fn orderings(&self) -> AdapterResult<Vec<PlaylistOrdering>> {
        Err(AdapterError::Unimplemented)
    }

    /// Start playing the given playlist.
    fn activate_playlist(&self, id: &PlaylistId) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// The playlist currently playing, if any. Default: none.
    fn active_playlist(&self) -> AdapterResult<Option<PlaylistEntry>> {
        Err(AdapterError::Unimplemented)
    }
}

/// Play queue access (`org.mpris.MediaPlayer2.TrackList`).
#[allow(unused_variables)]
pub trait TrackListAdapter: Send + Sync {
    /// Identifiers of the queued tracks, in play order. Default: empty.
    fn tracks(&self) -> AdapterResult<Vec<TrackId>> {
        Err(AdapterError::Unimplemented)
    }

    /// Look up a queued track. `None` when the id is unknown.
    fn track(&self, id: &TrackId) -> AdapterResult<Option<Track>> {
        Err(AdapterError::Unimplemented)
    }

    /// Complete metadata for a queued track, overriding `track`.
    fn track_metadata(&self, id: &TrackId) -> AdapterResult<Metadata> {
        Err(AdapterError::Unimplemented)
    }

    /// Queue a URI and return the identifier of the new track.
    fn add_track(
        &self,
        uri: &str,
        position: InsertPosition,
        set_as_current: bool,
    ) -> AdapterResult<TrackId> {
        Err(AdapterError::Unimplemented)
    }

    /// Remove a track from the queue.
    fn remove_track(&self, id: &TrackId) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Skip to a queued track.
    fn go_to(&self, id: &TrackId) -> AdapterResult<()> {
        Err(AdapterError::Unimplemented)
    }

    /// Whether tracks can be added and removed. Default: false.
    fn can_edit_tracks(&self) -> AdapterResult<bool> {
        Err(AdapterError::Unimplemented)
    }
}

/// Root adapter used when the host does not supply one.
struct DefaultRoot;

impl RootAdapter for DefaultRoot {}

/// The set of capability adapters a host hands to the bridge.
///
/// Player is mandatory; Playlists and TrackList are only exposed when set.
#[derive(Clone)]
pub struct Adapters {
    pub(crate) root: Arc<dyn RootAdapter>,
    pub(crate) player: Arc<dyn PlayerAdapter>,
    pub(crate) playlists: Option<Arc<dyn PlaylistsAdapter>>,
    pub(crate) track_list: Option<Arc<dyn TrackListAdapter>>,
}

impl Adapters {
    /// Start from a player adapter and the default root adapter.
    pub fn new(player: Arc<dyn PlayerAdapter>) -> Self {
        Self {
            root: Arc::new(DefaultRoot),
            player,
            playlists: None,
            track_list: None,
        }
    }

    /// Use `root` for application-level controls.
    pub fn with_root(mut self, root: Arc<dyn RootAdapter>) -> Self {
        self.root = root;
        self
    }

    /// Expose the Playlists interface backed by `playlists`.
    pub fn with_playlists(mut self, playlists: Arc<dyn PlaylistsAdapter>) -> Self {
        self.playlists = Some(playlists);
        self
    }

    /// Expose the TrackList interface backed by `track_list`.
    pub fn with_track_list(mut self, track_list: Arc<dyn TrackListAdapter>) -> Self {
        self.track_list = Some(track_list);
        self
    }
}
