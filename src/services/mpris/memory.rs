//! A self-contained player that keeps its queue and playlists in memory.
//!
//! Backs the demo binary and the test suites. It behaves like a real host
//! would: once attached to a dispatcher it reports its own track and playback
//! changes, and it keeps a journal of every mutating call it receives.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing::warn;

use super::{
    AdapterError, AdapterResult, Adapters, EventDispatcher, InsertPosition, LoopStatus,
    PlayState, PlayerAdapter, PlaylistEntry, PlaylistId, PlaylistsAdapter, RootAdapter, Track,
    TrackId, TrackListAdapter,
};

/// Which capability predicates the player reports as true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `CanControl`
    pub control: bool,
    /// `CanGoNext`, when a next track exists
    pub go_next: bool,
    /// `CanGoPrevious`, when a previous track exists
    pub go_previous: bool,
    /// `CanPlay`, when the queue is not empty
    pub play: bool,
    /// `CanPause`
    pub pause: bool,
    /// `CanSeek`, when a track is loaded
    pub seek: bool,
    /// `CanEditTracks`
    pub edit_tracks: bool,
    /// `CanRaise`
    pub raise: bool,
    /// `CanQuit`
    pub quit: bool,
    /// `CanSetFullscreen`
    pub set_fullscreen: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            control: true,
            go_next: true,
            go_previous: true,
            play: true,
            pause: true,
            seek: true,
            edit_tracks: true,
            raise: true,
            quit: true,
            set_fullscreen: true,
        }
    }
}

#[derive(Debug)]
struct State {
    queue: Vec<Track>,
    current: Option<usize>,
    status: PlayState,
    position: i64,
    volume: f64,
    muted: bool,
    rate: f64,
    shuffle: bool,
    loop_status: LoopStatus,
    fullscreen: bool,
    playlists: Vec<PlaylistEntry>,
    active_playlist: Option<PlaylistId>,
    capabilities: Capabilities,
    added: u32,
    calls: Vec<&'static str>,
}

impl State {
    fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.queue.iter().position(|track| &track.id == id)
    }

    fn has_next(&self) -> bool {
        match self.current {
            Some(index) => index + 1 < self.queue.len() || self.loop_status == LoopStatus::Playlist,
            None => false,
        }
    }

    fn has_previous(&self) -> bool {
        self.current.is_some_and(|index| index > 0)
    }
}

/// In-memory player implementing every adapter trait.
#[derive(Debug)]
pub struct InMemoryPlayer {
    state: Mutex<State>,
    dispatcher: OnceLock<EventDispatcher>,
}

impl Default for InMemoryPlayer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryPlayer {
    /// Player with `queue` loaded, the first track current and stopped.
    pub fn new(queue: Vec<Track>) -> Self {
        let current = if queue.is_empty() { None } else { Some(0) };
        Self {
            state: Mutex::new(State {
                queue,
                current,
                status: PlayState::Stopped,
                position: 0,
                volume: 1.0,
                muted: false,
                rate: 1.0,
                shuffle: false,
                loop_status: LoopStatus::None,
                fullscreen: false,
                playlists: Vec::new(),
                active_playlist: None,
                capabilities: Capabilities::default(),
                added: 0,
                calls: Vec::new(),
            }),
            dispatcher: OnceLock::new(),
        }
    }

    /// Replace the stored playlists.
    pub fn with_playlists(self, playlists: Vec<PlaylistEntry>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.playlists = playlists;
        }
        self
    }

    /// Every adapter backed by this player.
    pub fn adapters(self: &Arc<Self>) -> Adapters {
        Adapters::new(Arc::clone(self) as Arc<dyn PlayerAdapter>)
            .with_root(Arc::clone(self) as Arc<dyn RootAdapter>)
            .with_playlists(Arc::clone(self) as Arc<dyn PlaylistsAdapter>)
            .with_track_list(Arc::clone(self) as Arc<dyn TrackListAdapter>)
    }

    /// Report track and playback changes to `dispatcher` from now on.
    ///
    /// Only the first attached dispatcher is kept.
    pub fn attach(&self, dispatcher: EventDispatcher) {
        if self.dispatcher.set(dispatcher).is_err() {
            warn!("In-memory player is already attached to a dispatcher");
        }
    }

    /// Change which capabilities are reported and announce the change.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Failed` if the state lock is poisoned.
    pub fn set_capabilities(&self, capabilities: Capabilities) -> AdapterResult<()> {
        self.state()?.capabilities = capabilities;
        self.notify(|dispatcher| dispatcher.capabilities_changed());
        Ok(())
    }

    /// Names of the mutating adapter calls received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Failed` if the state lock is poisoned.
    pub fn calls(&self) -> AdapterResult<Vec<&'static str>> {
        Ok(self.state()?.calls.clone())
    }

    fn state(&self) -> AdapterResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AdapterError::failed("in-memory player state is poisoned"))
    }

    fn mutate<T>(
        &self,
        call: &'static str,
        apply: impl FnOnce(&mut State) -> AdapterResult<T>,
    ) -> AdapterResult<T> {
        let mut state = self.state()?;
        state.calls.push(call);
        apply(&mut state)
    }

    fn notify(&self, report: impl FnOnce(&EventDispatcher) -> crate::Result<()>) {
        if let Some(dispatcher) = self.dispatcher.get() {
            if let Err(e) = report(dispatcher) {
                warn!(error = %e, "In-memory player could not report a change");
            }
        }
    }

    fn track_changed(&self) {
        self.notify(|dispatcher| {
            dispatcher.track_changed()?;
            dispatcher.playback_status_changed()
        });
    }

    fn playback_changed(&self) {
        self.notify(|dispatcher| dispatcher.playback_status_changed());
    }

    fn unknown_track(id: &TrackId) -> AdapterError {
        AdapterError::failed(format!("track {id} is not queued"))
    }
}

impl RootAdapter for InMemoryPlayer {
    fn can_quit(&self) -> AdapterResult<bool> {
        Ok(self.state()?.capabilities.quit)
    }

    fn quit(&self) -> AdapterResult<()> {
        self.mutate("quit", |_| Ok(()))
    }

    fn can_raise(&self) -> AdapterResult<bool> {
        Ok(self.state()?.capabilities.raise)
    }

    fn raise(&self) -> AdapterResult<()> {
        self.mutate("raise", |_| Ok(()))
    }

    fn fullscreen(&self) -> AdapterResult<bool> {
        Ok(self.state()?.fullscreen)
    }

    fn can_set_fullscreen(&self) -> AdapterResult<bool> {
        Ok(self.state()?.capabilities.set_fullscreen)
    }

    fn set_fullscreen(&self, fullscreen: bool) -> AdapterResult<()> {
        self.mutate("set_fullscreen", |state| {
            state.fullscreen = fullscreen;
            Ok(())
        })
    }
}

impl PlayerAdapter for InMemoryPlayer {
    fn current_track(&self) -> AdapterResult<Option<Track>> {
        let state = self.state()?;
        Ok(state.current.and_then(|index| state.queue.get(index).cloned()))
    }

    fn position(&self) -> AdapterResult<i64> {
        Ok(self.state()?.position)
    }

    fn playback_status(&self) -> AdapterResult<PlayState> {
        Ok(self.state()?.status)
    }

    fn next(&self) -> AdapterResult<()> {
        self.mutate("next", |state| {
            if let Some(index) = state.current {
                state.current = Some(if index + 1 < state.queue.len() { index + 1 } else { 0 });
                state.position = 0;
            }
            Ok(())
        })?;
        self.track_changed();
        Ok(())
    }

    fn previous(&self) -> AdapterResult<()> {
        self.mutate("previous", |state| {
            state.current = state.current.map(|index| index.saturating_sub(1));
            state.position = 0;
            Ok(())
        })?;
        self.track_changed();
        Ok(())
    }

    fn pause(&self) -> AdapterResult<()> {
        self.mutate("pause", |state| {
            state.status = PlayState::Paused;
            Ok(())
        })?;
        self.playback_changed();
        Ok(())
    }

    fn resume(&self) -> AdapterResult<()> {
        self.mutate("resume", |state| {
            state.status = PlayState::Playing;
            Ok(())
        })?;
        self.playback_changed();
        Ok(())
    }

    fn stop(&self) -> AdapterResult<()> {
        self.mutate("stop", |state| {
            state.status = PlayState::Stopped;
            state.position = 0;
            Ok(())
        })?;
        self.playback_changed();
        Ok(())
    }

    fn play(&self) -> AdapterResult<()> {
        self.mutate("play", |state| {
            if state.current.is_none() && !state.queue.is_empty() {
                state.current = Some(0);
            }
            state.status = PlayState::Playing;
            state.position = 0;
            Ok(())
        })?;
        self.track_changed();
        Ok(())
    }

    fn seek(&self, position: i64) -> AdapterResult<()> {
        self.mutate("seek", |state| {
            state.position = position;
            Ok(())
        })
    }

    fn open_uri(&self, uri: &str) -> AdapterResult<()> {
        self.mutate("open_uri", |state| {
            let track = queued_track(state, uri)?;
            state.queue.push(track);
            state.current = Some(state.queue.len() - 1);
            state.status = PlayState::Playing;
            state.position = 0;
            Ok(())
        })?;
        self.track_changed();
        Ok(())
    }

    fn loop_status(&self) -> AdapterResult<LoopStatus> {
        Ok(self.state()?.loop_status)
    }

    fn set_loop_status(&self, status: LoopStatus) -> AdapterResult<()> {
        self.mutate("set_loop_status", |state| {
            state.loop_status = status;
            Ok(())
        })?;
        self.notify(|dispatcher| dispatcher.options_changed());
        Ok(())
    }

    fn rate(&self) -> AdapterResult<f64> {
        Ok(self.state()?.rate)
    }

    fn set_rate(&self, rate: f64) -> AdapterResult<()> {
        self.mutate("set_rate", |state| {
            state.rate = rate;
            Ok(())
        })
    }

    fn shuffle(&self) -> AdapterResult<bool> {
        Ok(self.state()?.shuffle)
    }

    fn set_shuffle(&self, shuffle: bool) -> AdapterResult<()> {
        self.mutate("set_shuffle", |state| {
            state.shuffle = shuffle;
            Ok(())
        })
    }

    fn volume(&self) -> AdapterResult<f64> {
        Ok(self.state()?.volume)
    }

    fn set_volume(&self, volume: f64) -> AdapterResult<()> {
        self.mutate("set_volume", |state| {
            state.volume = volume;
            Ok(())
        })
    }

    fn is_mute(&self) -> AdapterResult<bool> {
        Ok(self.state()?.muted)
    }

    fn set_mute(&self, mute: bool) -> AdapterResult<()> {
        self.mutate("set_mute", |state| {
            state.muted = mute;
            Ok(())
        })
    }

    fn can_go_next(&self) -> AdapterResult<bool> {
        let state = self.state()?;
        Ok(state.capabilities.go_next && state.has_next())
    }

    fn can_go_previous(&self) -> AdapterResult<bool> {
        let state = self.state()?;
        Ok(state.capabilities.go_previous && state.has_previous())
    }

    fn can_play(&self) -> AdapterResult<bool> {
        let state = self.state()?;
        Ok(state.capabilities.play && !state.queue.is_empty())
    }

    fn can_pause(&self) -> AdapterResult<bool> {
        Ok(self.state()?.capabilities.pause)
    }

    fn can_seek(&self) -> AdapterResult<bool> {
        let state = self.state()?;
        Ok(state.capabilities.seek && state.current.is_some())
    }

    fn can_control(&self) -> AdapterResult<bool> {
        Ok(self.state()?.capabilities.control)
    }
}

impl PlaylistsAdapter for InMemoryPlayer {
    fn playlists(&self) -> AdapterResult<Vec<PlaylistEntry>> {
        Ok(self.state()?.playlists.clone())
    }

    fn activate_playlist(&self, id: &PlaylistId) -> AdapterResult<()> {
        self.mutate("activate_playlist", |state| {
            if !state.playlists.iter().any(|entry| &entry.id == id) {
                return Err(AdapterError::failed(format!("playlist {id} does not exist")));
            }
            state.active_playlist = Some(id.clone());
            Ok(())
        })
    }

    fn active_playlist(&self) -> AdapterResult<Option<PlaylistEntry>> {
        let state = self.state()?;
        Ok(state.active_playlist.as_ref().and_then(|id| {
            state
                .playlists
                .iter()
                .find(|entry| &entry.id == id)
                .cloned()
        }))
    }
}

impl TrackListAdapter for InMemoryPlayer {
    fn tracks(&self) -> AdapterResult<Vec<TrackId>> {
        Ok(self
            .state()?
            .queue
            .iter()
            .map(|track| track.id.clone())
            .collect())
    }

    fn track(&self, id: &TrackId) -> AdapterResult<Option<Track>> {
        let state = self.state()?;
        Ok(state.index_of(id).map(|index| state.queue[index].clone()))
    }

    fn add_track(
        &self,
        uri: &str,
        position: InsertPosition,
        set_as_current: bool,
    ) -> AdapterResult<TrackId> {
        let id = self.mutate("add_track", |state| {
            let index = match &position {
                InsertPosition::Head => 0,
                InsertPosition::After(after) => {
                    state.index_of(after).ok_or_else(|| Self::unknown_track(after))? + 1
                }
            };

            let track = queued_track(state, uri)?;
            let id = track.id.clone();
            state.queue.insert(index, track);

            state.current = match state.current {
                _ if set_as_current => Some(index),
                Some(current) if current >= index => Some(current + 1),
                other => other,
            };
            Ok(id)
        })?;

        if set_as_current {
            self.track_changed();
        }
        Ok(id)
    }

    fn remove_track(&self, id: &TrackId) -> AdapterResult<()> {
        let was_current = self.mutate("remove_track", |state| {
            let index = state.index_of(id).ok_or_else(|| Self::unknown_track(id))?;
            state.queue.remove(index);

            let was_current = state.current == Some(index);
            let remaining = state.queue.len();
            state.current = match state.current {
                _ if remaining == 0 => None,
                Some(current) if current > index => Some(current - 1),
                Some(current) => Some(current.min(remaining - 1)),
                None => None,
            };
            Ok(was_current)
        })?;

        if was_current {
            self.track_changed();
        }
        Ok(())
    }

    fn go_to(&self, id: &TrackId) -> AdapterResult<()> {
        self.mutate("go_to", |state| {
            let index = state.index_of(id).ok_or_else(|| Self::unknown_track(id))?;
            state.current = Some(index);
            state.position = 0;
            Ok(())
        })?;
        self.track_changed();
        Ok(())
    }

    fn can_edit_tracks(&self) -> AdapterResult<bool> {
        Ok(self.state()?.capabilities.edit_tracks)
    }
}

/// A new track for `uri`, named after its last path segment.
fn queued_track(state: &mut State, uri: &str) -> AdapterResult<Track> {
    state.added += 1;
    let id = TrackId::new(format!("/org/mpris/MediaPlayer2/Track/{}", state.added))
        .map_err(|e| AdapterError::failed(e.to_string()))?;

    let name = uri
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(uri);

    let mut track = Track::new(id, name);
    track.uri = Some(uri.to_string());
    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(n: u32) -> Track {
        Track::new(
            TrackId::new(format!("/org/example/track/{n}")).unwrap(),
            format!("Track {n}"),
        )
    }

    #[test]
    fn add_at_head_shifts_current_track() {
        let player = InMemoryPlayer::new(vec![track(1), track(2)]);

        let added = player
            .add_track("file:///music/intro.flac", InsertPosition::Head, false)
            .unwrap();

        assert_eq!(player.tracks().unwrap()[0], added);
        assert_eq!(player.current_track().unwrap().unwrap().id, track(1).id);
        assert_eq!(player.track(&added).unwrap().unwrap().name, "intro.flac");
    }

    #[test]
    fn add_after_unknown_track_fails_without_change() {
        let player = InMemoryPlayer::new(vec![track(1)]);

        let result = player.add_track(
            "file:///x.ogg",
            InsertPosition::After(track(9).id),
            false,
        );

        assert!(matches!(result, Err(AdapterError::Failed(_))));
        assert_eq!(player.tracks().unwrap().len(), 1);
    }

    #[test]
    fn removing_current_track_moves_to_following_one() {
        let player = InMemoryPlayer::new(vec![track(1), track(2), track(3)]);
        player.go_to(&track(2).id).unwrap();

        player.remove_track(&track(2).id).unwrap();

        assert_eq!(player.current_track().unwrap().unwrap().id, track(3).id);
    }

    #[test]
    fn next_is_only_offered_with_a_following_track() {
        let player = InMemoryPlayer::new(vec![track(1), track(2)]);
        assert!(player.can_go_next().unwrap());

        player.next().unwrap();
        assert!(!player.can_go_next().unwrap());

        player.set_loop_status(LoopStatus::Playlist).unwrap();
        assert!(player.can_go_next().unwrap());
    }

    #[test]
    fn journal_records_mutations_only() {
        let player = InMemoryPlayer::new(vec![track(1)]);

        player.play().unwrap();
        let _ = player.volume().unwrap();
        player.pause().unwrap();

        assert_eq!(player.calls().unwrap(), vec!["play", "pause"]);
    }
}
