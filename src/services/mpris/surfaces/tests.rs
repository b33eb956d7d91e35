use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::BridgeConfig;
use crate::services::mpris::{
    AdapterResult, Adapters, Capabilities, InMemoryPlayer, PlayerAdapter, TrackListAdapter, Interface, MetadataValue, MprisBridge, PlaylistEntry,
    PlaylistId, PropertySource, PropertyValue, Signal, SignalSink, Track, TrackId,
    metadata::keys,
    properties::{player, track_list},
};
use crate::{BridgeError, Result};

#[derive(Default)]
struct RecordingSink {
    signals: Mutex<Vec<Signal>>,
}

impl RecordingSink {
    fn take(&self) -> Vec<Signal> {
        std::mem::take(&mut *self.signals.lock().unwrap())
    }
}

#[async_trait]
impl SignalSink for RecordingSink {
    async fn emit(&self, signal: Signal) -> Result<()> {
        self.signals.lock().unwrap().push(signal);
        Ok(())
    }
}

fn track(n: u32, seconds: u64) -> Track {
    let mut track = Track::new(
        TrackId::new(format!("/org/example/track/{n}")).unwrap(),
        format!("Track {n}"),
    );
    track.length = seconds * 1_000_000;
    track
}

fn start(player: &Arc<InMemoryPlayer>) -> (MprisBridge, Arc<RecordingSink>) {
    start_with(player, BridgeConfig::default())
}

fn start_with(
    player: &Arc<InMemoryPlayer>,
    config: BridgeConfig,
) -> (MprisBridge, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let bridge = MprisBridge::start(player.adapters(), config, sink.clone()).unwrap();
    (bridge, sink)
}

#[tokio::test]
async fn next_without_capability_touches_nothing() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 60)]));
    let (bridge, sink) = start(&player);

    bridge.player().next().unwrap();
    bridge.dispatcher().flush().await.unwrap();

    assert!(player.calls().unwrap().is_empty());
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn seek_emits_seeked_with_target_position() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 180)]));
    let (bridge, sink) = start(&player);

    bridge.player().seek(5_000_000).unwrap();
    bridge.dispatcher().flush().await.unwrap();

    assert_eq!(player.calls().unwrap(), vec!["seek"]);
    assert_eq!(sink.take(), vec![Signal::Seeked(5_000_000)]);
    assert_eq!(bridge.player().position().unwrap(), 5_000_000);
}

#[tokio::test]
async fn seek_before_start_clamps_to_zero() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 180)]));
    let (bridge, sink) = start(&player);

    bridge.player().seek(-3_000_000).unwrap();
    bridge.dispatcher().flush().await.unwrap();

    assert_eq!(sink.take(), vec![Signal::Seeked(0)]);
}

#[tokio::test]
async fn seek_past_end_skips_to_next_track() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10), track(2, 10)]));
    let (bridge, sink) = start(&player);

    bridge.player().seek(20_000_000).unwrap();
    bridge.dispatcher().flush().await.unwrap();

    assert_eq!(player.calls().unwrap(), vec!["next"]);
    assert!(!sink.take().iter().any(|s| matches!(s, Signal::Seeked(_))));
}

#[tokio::test]
async fn set_position_ignores_other_tracks_and_out_of_range() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10), track(2, 10)]));
    let (bridge, _sink) = start(&player);

    bridge.player().set_position(&track(2, 10).id, 1_000).unwrap();
    bridge.player().set_position(&track(1, 10).id, -1).unwrap();
    bridge.player().set_position(&track(1, 10).id, 11_000_000).unwrap();
    assert!(player.calls().unwrap().is_empty());

    bridge.player().set_position(&track(1, 10).id, 4_000_000).unwrap();
    assert_eq!(player.calls().unwrap(), vec!["seek"]);
}

#[tokio::test]
async fn set_position_on_track_of_unknown_length_is_applied() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 0)]));
    let (bridge, sink) = start(&player);

    bridge.player().set_position(&track(1, 0).id, 4_000_000).unwrap();
    bridge.dispatcher().flush().await.unwrap();

    assert_eq!(player.calls().unwrap(), vec!["seek"]);
    assert_eq!(sink.take(), vec![Signal::Seeked(4_000_000)]);
}

#[tokio::test]
async fn rate_zero_pauses_and_out_of_bounds_is_rejected() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    let (bridge, _sink) = start(&player);

    bridge.player().set_rate(0.0).unwrap();
    let result = bridge.player().set_rate(2.0);

    assert_eq!(player.calls().unwrap(), vec!["pause"]);
    assert!(matches!(result, Err(BridgeError::InvalidValue { property: "Rate", .. })));
}

#[tokio::test]
async fn rate_within_configured_bounds_is_applied() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    let config = BridgeConfig {
        minimum_rate: 0.5,
        maximum_rate: 2.0,
        ..BridgeConfig::default()
    };
    let (bridge, sink) = start_with(&player, config);

    bridge.player().set_rate(1.5).unwrap();
    bridge.dispatcher().flush().await.unwrap();

    assert_eq!(bridge.player().rate().unwrap(), 1.5);
    assert_eq!(
        sink.take(),
        vec![Signal::PropertiesChanged {
            interface: Interface::Player,
            changed: vec![(player::RATE, PropertyValue::F64(1.5))],
            invalidated: vec![],
        }]
    );
}

#[tokio::test]
async fn zero_volume_mutes_and_positive_volume_unmutes() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    let (bridge, _sink) = start(&player);

    bridge.player().set_volume(0.0).unwrap();
    assert_eq!(bridge.player().volume().unwrap(), 0.0);

    bridge.player().set_volume(0.4).unwrap();
    assert_eq!(bridge.player().volume().unwrap(), 0.4);
    assert_eq!(
        player.calls().unwrap(),
        vec!["set_mute", "set_mute", "set_volume"]
    );
}

#[tokio::test]
async fn negative_volume_is_rejected_without_adapter_call() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    let (bridge, _sink) = start(&player);

    let result = bridge.player().set_volume(-0.1);

    assert!(matches!(result, Err(BridgeError::InvalidValue { .. })));
    assert!(player.calls().unwrap().is_empty());
}

#[tokio::test]
async fn loop_status_tags_are_validated() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    let (bridge, sink) = start(&player);

    let rejected = bridge.player().set_loop_status("Forever");
    bridge.player().set_loop_status("Track").unwrap();
    bridge.dispatcher().flush().await.unwrap();

    assert!(matches!(rejected, Err(BridgeError::InvalidEnum { .. })));
    assert_eq!(
        sink.take(),
        vec![Signal::PropertiesChanged {
            interface: Interface::Player,
            changed: vec![(player::LOOP_STATUS, PropertyValue::Str("Track".into()))],
            invalidated: vec![],
        }]
    );
}

#[tokio::test]
async fn play_resumes_a_paused_track() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    let (bridge, _sink) = start(&player);

    bridge.player().play_pause().unwrap();
    bridge.player().play_pause().unwrap();
    bridge.player().play().unwrap();

    assert_eq!(player.calls().unwrap(), vec!["play", "pause", "resume"]);
}

#[tokio::test]
async fn play_pause_follows_can_pause() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    player
        .set_capabilities(Capabilities {
            pause: false,
            ..Capabilities::default()
        })
        .unwrap();
    let (bridge, _sink) = start(&player);

    bridge.player().play_pause().unwrap();
    assert!(player.calls().unwrap().is_empty());

    player
        .set_capabilities(Capabilities {
            play: false,
            ..Capabilities::default()
        })
        .unwrap();
    bridge.player().play_pause().unwrap();
    assert_eq!(player.calls().unwrap(), vec!["play"]);
}

#[tokio::test]
async fn capabilities_are_false_without_control() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10), track(2, 10)]));
    player
        .set_capabilities(Capabilities {
            control: false,
            ..Capabilities::default()
        })
        .unwrap();
    let (bridge, _sink) = start(&player);
    let surface = bridge.player();

    assert!(!surface.can_go_next().unwrap());
    assert!(!surface.can_play().unwrap());
    assert!(!surface.can_pause().unwrap());
    assert!(!surface.can_seek().unwrap());

    surface.stop().unwrap();
    surface.set_shuffle(true).unwrap();
    assert!(player.calls().unwrap().is_empty());
}

#[tokio::test]
async fn missing_track_exposes_only_sentinel_id() {
    let player = Arc::new(InMemoryPlayer::default());
    let (bridge, _sink) = start(&player);

    let metadata = bridge.player().metadata().unwrap();

    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata.track_id(), Some(&TrackId::no_track()));
}

#[tokio::test]
async fn raise_and_quit_respect_their_capabilities() {
    let player = Arc::new(InMemoryPlayer::default());
    player
        .set_capabilities(Capabilities {
            quit: false,
            ..Capabilities::default()
        })
        .unwrap();
    let (bridge, _sink) = start(&player);

    bridge.root().quit().unwrap();
    bridge.root().raise().unwrap();

    assert_eq!(player.calls().unwrap(), vec!["raise"]);
    assert!(bridge.root().has_track_list());
}

fn named(name: &str) -> PlaylistEntry {
    PlaylistEntry::new(
        PlaylistId::new(format!("/org/example/playlist/{name}")).unwrap(),
        name,
    )
}

#[tokio::test]
async fn playlists_are_sorted_reversed_then_paged() {
    let entries = ["C", "A", "E", "B", "D"].map(named).to_vec();
    let player = Arc::new(InMemoryPlayer::default().with_playlists(entries));
    let (bridge, _sink) = start(&player);
    let playlists = bridge.playlists().unwrap();

    let names = |reverse: bool, index: u32| -> Vec<String> {
        playlists
            .get_playlists(index, 2, "Alphabetical", reverse)
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    };

    assert_eq!(names(false, 0), ["A", "B"]);
    assert_eq!(names(true, 0), ["E", "D"]);
    assert!(names(false, 7).is_empty());
    assert_eq!(playlists.playlist_count().unwrap(), 5);
}

#[tokio::test]
async fn unknown_ordering_is_rejected() {
    let player = Arc::new(InMemoryPlayer::default());
    let (bridge, _sink) = start(&player);

    let result = bridge
        .playlists()
        .unwrap()
        .get_playlists(0, 10, "Random", false);

    assert!(matches!(result, Err(BridgeError::InvalidEnum { .. })));
}

#[tokio::test]
async fn active_playlist_is_invalid_until_activated() {
    let player = Arc::new(InMemoryPlayer::default().with_playlists(vec![named("A")]));
    let (bridge, _sink) = start(&player);
    let playlists = bridge.playlists().unwrap();

    assert!(!playlists.active_playlist().unwrap().valid);

    playlists.activate_playlist(&named("A").id).unwrap();

    let active = playlists.active_playlist().unwrap();
    assert!(active.valid);
    assert_eq!(active.entry.name, "A");
}

#[tokio::test]
async fn add_track_at_head_emits_one_track_added() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10), track(2, 10)]));
    let (bridge, sink) = start(&player);
    let track_list = bridge.track_list().unwrap();

    track_list
        .add_track("file:///music/new.flac", TrackId::no_track(), false)
        .unwrap();
    bridge.dispatcher().flush().await.unwrap();

    let tracks = track_list.tracks().unwrap();
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[1], track(1, 10).id);

    let signals = sink.take();
    let added: Vec<_> = signals
        .iter()
        .filter_map(|signal| match signal {
            Signal::TrackAdded { metadata, after } => Some((metadata, after)),
            _ => None,
        })
        .collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].0.track_id(), Some(&tracks[0]));
    assert!(added[0].1.is_no_track());
    assert!(signals.contains(&Signal::PropertiesChanged {
        interface: Interface::TrackList,
        changed: vec![],
        invalidated: vec![track_list::TRACKS],
    }));
}

#[tokio::test]
async fn failed_add_track_emits_nothing() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    let (bridge, sink) = start(&player);

    let result = bridge
        .track_list()
        .unwrap()
        .add_track("file:///x.ogg", track(9, 1).id, false);
    bridge.dispatcher().flush().await.unwrap();

    assert!(matches!(result, Err(BridgeError::Adapter { operation: "add_track", .. })));
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn editing_requires_can_edit_tracks() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10)]));
    player
        .set_capabilities(Capabilities {
            edit_tracks: false,
            ..Capabilities::default()
        })
        .unwrap();
    let (bridge, _sink) = start(&player);
    let track_list = bridge.track_list().unwrap();

    track_list
        .add_track("file:///x.ogg", TrackId::no_track(), false)
        .unwrap();
    track_list.remove_track(&track(1, 10).id).unwrap();
    track_list.go_to(&track(1, 10).id).unwrap();

    assert_eq!(player.calls().unwrap(), vec!["go_to"]);
}

#[tokio::test]
async fn tracks_metadata_skips_unknown_ids() {
    let player = Arc::new(InMemoryPlayer::new(vec![track(1, 10), track(2, 10)]));
    let (bridge, _sink) = start(&player);

    let metadata = bridge
        .track_list()
        .unwrap()
        .get_tracks_metadata(&[track(2, 10).id, track(5, 1).id, track(1, 10).id])
        .unwrap();

    let titles: Vec<_> = metadata.iter().map(|m| m.get(keys::TITLE).cloned()).collect();
    assert_eq!(
        titles,
        [
            Some(MetadataValue::from("Track 2")),
            Some(MetadataValue::from("Track 1")),
        ]
    );
}

#[tokio::test]
async fn unknown_property_is_an_error() {
    let player = Arc::new(InMemoryPlayer::default());
    let (bridge, _sink) = start(&player);

    let result = bridge.surfaces().property(Interface::Player, "Colour");

    assert!(matches!(result, Err(BridgeError::UnknownProperty { .. })));
}

/// A host that only supplies artwork through its per-index lookup and
/// reports NaN for continuous values.
struct Cataloged;

fn numbered() -> Track {
    let mut track = track(3, 60);
    track.track_no = Some(3);
    track
}

impl PlayerAdapter for Cataloged {
    fn current_track(&self) -> AdapterResult<Option<Track>> {
        Ok(Some(numbered()))
    }

    fn art_url(&self, track_no: Option<u32>) -> AdapterResult<Option<String>> {
        Ok(track_no.map(|n| format!("file:///covers/{n}.png")))
    }

    fn volume(&self) -> AdapterResult<f64> {
        Ok(f64::NAN)
    }

    fn rate(&self) -> AdapterResult<f64> {
        Ok(f64::INFINITY)
    }
}

impl TrackListAdapter for Cataloged {
    fn tracks(&self) -> AdapterResult<Vec<TrackId>> {
        Ok(vec![numbered().id])
    }

    fn track(&self, id: &TrackId) -> AdapterResult<Option<Track>> {
        Ok((*id == numbered().id).then(numbered))
    }
}

fn start_cataloged() -> (MprisBridge, Arc<RecordingSink>) {
    let host = Arc::new(Cataloged);
    let adapters = Adapters::new(host.clone()).with_track_list(host);
    let sink = Arc::new(RecordingSink::default());
    let bridge = MprisBridge::start(adapters, BridgeConfig::default(), sink.clone()).unwrap();
    (bridge, sink)
}

#[tokio::test]
async fn track_list_metadata_uses_host_artwork_lookup() {
    let (bridge, sink) = start_cataloged();
    let cover = MetadataValue::from("file:///covers/3.png");

    let listed = bridge
        .track_list()
        .unwrap()
        .get_tracks_metadata(&[numbered().id])
        .unwrap();
    assert_eq!(listed[0].get(keys::ART_URL), Some(&cover));
    assert_eq!(
        bridge.player().metadata().unwrap().get(keys::ART_URL),
        Some(&cover)
    );

    bridge
        .dispatcher()
        .track_metadata_changed(numbered().id)
        .unwrap();
    bridge.dispatcher().flush().await.unwrap();
    assert!(matches!(
        &sink.take()[..],
        [Signal::TrackMetadataChanged { metadata, .. }]
            if metadata.get(keys::ART_URL) == Some(&cover)
    ));
}

#[tokio::test]
async fn non_finite_host_values_fall_back_to_defaults() {
    let (bridge, sink) = start_cataloged();

    assert_eq!(bridge.player().volume().unwrap(), 1.0);
    assert_eq!(bridge.player().rate().unwrap(), 1.0);

    bridge.dispatcher().volume_changed().unwrap();
    bridge.dispatcher().rate_changed().unwrap();
    bridge.dispatcher().flush().await.unwrap();
    assert!(sink.take().is_empty());
}
