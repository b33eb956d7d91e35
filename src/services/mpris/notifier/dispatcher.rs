use tokio::sync::{mpsc, oneshot};

use super::Signal;
use crate::services::mpris::{
    Interface, PlaylistEntry, TrackId,
    properties::{player, playlists, root, track_list},
};
use crate::{BridgeError, Result};

/// Work item consumed by the notifier worker, in submission order.
#[derive(Debug)]
pub(crate) enum Event {
    /// Diff the named properties and announce the changes
    Refresh {
        interface: Interface,
        properties: &'static [&'static str],
    },

    /// Emit a fully formed signal as-is
    Signal(Signal),

    /// Look up the new track's metadata and emit `TrackAdded`
    TrackAdded { track: TrackId, after: TrackId },

    /// Look up the track's metadata and emit `TrackMetadataChanged`
    TrackMetadataChanged(TrackId),

    /// Resolve once every earlier event has been handled
    Flush(oneshot::Sender<()>),
}

const TRACK_CHANGED: &[&str] = &[
    player::METADATA,
    player::CAN_GO_NEXT,
    player::CAN_GO_PREVIOUS,
    player::CAN_PLAY,
    player::CAN_PAUSE,
    player::CAN_SEEK,
];

const PLAYBACK_STATUS_CHANGED: &[&str] = &[
    player::PLAYBACK_STATUS,
    player::METADATA,
    player::CAN_PLAY,
    player::CAN_PAUSE,
];

const VOLUME_CHANGED: &[&str] = &[player::VOLUME];

const RATE_CHANGED: &[&str] = &[player::RATE, player::MINIMUM_RATE, player::MAXIMUM_RATE];

const OPTIONS_CHANGED: &[&str] = &[
    player::LOOP_STATUS,
    player::SHUFFLE,
    player::CAN_GO_NEXT,
    player::CAN_GO_PREVIOUS,
];

const CAPABILITIES_CHANGED: &[&str] = &[
    player::CAN_CONTROL,
    player::CAN_GO_NEXT,
    player::CAN_GO_PREVIOUS,
    player::CAN_PLAY,
    player::CAN_PAUSE,
    player::CAN_SEEK,
];

const ROOT_CHANGED: &[&str] = &[
    root::FULLSCREEN,
    root::CAN_SET_FULLSCREEN,
    root::CAN_RAISE,
    root::CAN_QUIT,
];

const PLAYLISTS_CHANGED: &[&str] = &[
    playlists::PLAYLIST_COUNT,
    playlists::ORDERINGS,
    playlists::ACTIVE_PLAYLIST,
];

const TRACKS_CHANGED: &[&str] = &[track_list::TRACKS];

/// Entry point for the host to report state changes.
///
/// Cheap to clone and safe to call from any thread. Every call enqueues work
/// for the single notifier worker, so emissions never interleave and always
/// follow the order in which events were reported.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    events: mpsc::UnboundedSender<Event>,
}

impl EventDispatcher {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { events }, rx)
    }

    fn send(&self, event: Event) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| BridgeError::DispatcherClosed)
    }

    /// Re-read the given properties and announce any that changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn refresh(&self, interface: Interface, properties: &'static [&'static str]) -> Result<()> {
        self.send(Event::Refresh {
            interface,
            properties,
        })
    }

    /// The current track changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn track_changed(&self) -> Result<()> {
        self.refresh(Interface::Player, TRACK_CHANGED)
    }

    /// Playback started, paused, or stopped.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn playback_status_changed(&self) -> Result<()> {
        self.refresh(Interface::Player, PLAYBACK_STATUS_CHANGED)
    }

    /// Volume or mute state changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn volume_changed(&self) -> Result<()> {
        self.refresh(Interface::Player, VOLUME_CHANGED)
    }

    /// Playback rate changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn rate_changed(&self) -> Result<()> {
        self.refresh(Interface::Player, RATE_CHANGED)
    }

    /// Shuffle or loop mode changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn options_changed(&self) -> Result<()> {
        self.refresh(Interface::Player, OPTIONS_CHANGED)
    }

    /// Any of the player's capability predicates changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn capabilities_changed(&self) -> Result<()> {
        self.refresh(Interface::Player, CAPABILITIES_CHANGED)
    }

    /// Playback jumped to `position` microseconds.
    ///
    /// Always emits `Seeked`, even when the position repeats.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn seeked(&self, position: i64) -> Result<()> {
        self.send(Event::Signal(Signal::Seeked(position)))
    }

    /// Fullscreen state or window capabilities changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn root_changed(&self) -> Result<()> {
        self.refresh(Interface::Root, ROOT_CHANGED)
    }

    /// Playlists were added or removed, or the active playlist changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn playlists_changed(&self) -> Result<()> {
        self.refresh(Interface::Playlists, PLAYLISTS_CHANGED)
    }

    /// A single playlist was renamed or got a new icon.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn playlist_changed(&self, playlist: PlaylistEntry) -> Result<()> {
        self.send(Event::Signal(Signal::PlaylistChanged(playlist)))
    }

    /// `track` was inserted after `after` (the "no track" id for the head).
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn track_added(&self, track: TrackId, after: TrackId) -> Result<()> {
        self.send(Event::TrackAdded { track, after })?;
        self.refresh(Interface::TrackList, TRACKS_CHANGED)
    }

    /// `track` was removed from the track list.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn track_removed(&self, track: TrackId) -> Result<()> {
        self.send(Event::Signal(Signal::TrackRemoved(track)))?;
        self.refresh(Interface::TrackList, TRACKS_CHANGED)
    }

    /// The whole track list was replaced.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn track_list_replaced(&self, tracks: Vec<TrackId>, current: TrackId) -> Result<()> {
        self.send(Event::Signal(Signal::TrackListReplaced { tracks, current }))?;
        self.refresh(Interface::TrackList, TRACKS_CHANGED)
    }

    /// Metadata of a queued track changed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub fn track_metadata_changed(&self, track: TrackId) -> Result<()> {
        self.send(Event::TrackMetadataChanged(track))
    }

    /// Waits until every event reported before this call has been emitted.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::DispatcherClosed` if the notifier has stopped.
    pub async fn flush(&self) -> Result<()> {
        let (done, wait) = oneshot::channel();
        self.send(Event::Flush(done))?;
        wait.await.map_err(|_| BridgeError::DispatcherClosed)
    }
}
