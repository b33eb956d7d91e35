//! End-to-end behavior of the bridge driven through its public API.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mpris_host::{
    Result,
    config::BridgeConfig,
    services::mpris::{
        Album, Artist, InMemoryPlayer, Interface, MetadataValue, MprisBridge, PlayerAdapter,
        PropertyValue, Signal, SignalSink, Track, TrackId, metadata::keys, properties::player,
    },
};

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

fn track(n: u32) -> Track {
    let mut track = Track::new(
        TrackId::new(format!("/org/example/track/{n}")).unwrap(),
        format!("Track {n}"),
    );
    track.length = 120_000_000;
    track
}

fn attached(player: &Arc<InMemoryPlayer>) -> (MprisBridge, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let bridge =
        MprisBridge::start(player.adapters(), BridgeConfig::default(), sink.clone()).unwrap();
    player.attach(bridge.dispatcher());
    (bridge, sink)
}

fn changed_names(signals: &[Signal], wanted: Interface) -> Vec<&'static str> {
    signals
        .iter()
        .filter_map(|signal| match signal {
            Signal::PropertiesChanged {
                interface,
                changed,
                ..
            } if *interface == wanted => Some(changed.iter().map(|(name, _)| *name)),
            _ => None,
        })
        .flatten()
        .collect()
}

mod metadata {
    use super::*;

    #[tokio::test]
    async fn track_without_album_has_no_album_keys() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1)]));
        let (bridge, _sink) = attached(&player);

        let metadata = bridge.player().metadata().unwrap();

        assert_eq!(metadata.track_id(), Some(&track(1).id));
        assert!(!metadata.contains_key(keys::ALBUM));
        assert!(!metadata.contains_key(keys::ALBUM_ARTIST));
        assert!(metadata.contains_key(keys::ARTIST));
    }

    #[tokio::test]
    async fn artists_keep_their_order() {
        let mut first = track(1);
        first.artists = vec![Artist::new("A"), Artist::new("B")];
        first.album = Some(Album::new("Record"));
        let player = Arc::new(InMemoryPlayer::new(vec![first]));
        let (bridge, _sink) = attached(&player);

        let metadata = bridge.player().metadata().unwrap();

        assert_eq!(
            metadata.get(keys::ARTIST),
            Some(&MetadataValue::Strings(vec!["A".to_string(), "B".to_string()]))
        );
        assert!(metadata.contains_key(keys::ALBUM));
    }

    #[tokio::test]
    async fn metadata_marshals_to_dbus_map() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1)]));
        let (bridge, _sink) = attached(&player);

        let map = bridge.player().metadata().unwrap().to_dbus().unwrap();

        assert!(map.contains_key(keys::TRACK_ID));
        assert!(map.contains_key(keys::LENGTH));
    }
}

mod notifications {
    use super::*;

    #[tokio::test]
    async fn identical_state_is_announced_once() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1), track(2)]));
        let (bridge, sink) = attached(&player);
        let dispatcher = bridge.dispatcher();

        player.next().unwrap();
        dispatcher.track_changed().unwrap();
        dispatcher.track_changed().unwrap();
        dispatcher.flush().await.unwrap();

        let signals = sink.take();
        let metadata_changes = changed_names(&signals, Interface::Player)
            .into_iter()
            .filter(|name| *name == player::METADATA)
            .count();
        assert_eq!(metadata_changes, 1);
    }

    #[tokio::test]
    async fn one_signal_carries_every_changed_property() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1), track(2)]));
        let (bridge, sink) = attached(&player);

        bridge.player().next().unwrap();
        bridge.dispatcher().flush().await.unwrap();

        let signals = sink.take();
        let first = signals
            .iter()
            .find(|signal| matches!(signal, Signal::PropertiesChanged { .. }))
            .unwrap();
        let Signal::PropertiesChanged { changed, .. } = first else {
            unreachable!()
        };
        let names: Vec<_> = changed.iter().map(|(name, _)| *name).collect();
        assert!(names.contains(&player::METADATA));
        assert!(names.contains(&player::CAN_GO_NEXT));
        assert!(names.contains(&player::CAN_GO_PREVIOUS));
    }

    #[tokio::test]
    async fn change_made_right_after_start_is_announced() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1)]));
        let (bridge, sink) = attached(&player);

        bridge.player().set_volume(0.5).unwrap();
        bridge.dispatcher().flush().await.unwrap();

        let signals = sink.take();
        assert_eq!(signals.len(), 1);
        assert!(matches!(
            &signals[0],
            Signal::PropertiesChanged { interface: Interface::Player, changed, .. }
                if changed == &vec![(player::VOLUME, PropertyValue::F64(0.5))]
        ));
    }

    #[tokio::test]
    async fn repeated_seeks_are_all_signalled() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1)]));
        let (bridge, sink) = attached(&player);

        bridge.player().seek(5_000_000).unwrap();
        bridge.player().seek(-5_000_000).unwrap();
        bridge.player().seek(5_000_000).unwrap();
        bridge.dispatcher().flush().await.unwrap();

        assert_eq!(
            sink.take(),
            vec![
                Signal::Seeked(5_000_000),
                Signal::Seeked(0),
                Signal::Seeked(5_000_000),
            ]
        );
    }

    #[tokio::test]
    async fn position_is_never_announced() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1)]));
        let (bridge, sink) = attached(&player);

        player.seek(9_000_000).unwrap();
        bridge
            .dispatcher()
            .refresh(Interface::Player, &[player::POSITION])
            .unwrap();
        bridge.dispatcher().flush().await.unwrap();

        assert!(sink.take().is_empty());
        assert_eq!(bridge.player().position().unwrap(), 9_000_000);
    }

    #[tokio::test]
    async fn playback_changes_report_status() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1)]));
        let (bridge, sink) = attached(&player);

        bridge.player().play().unwrap();
        bridge.dispatcher().flush().await.unwrap();

        let signals = sink.take();
        assert!(signals.iter().any(|signal| match signal {
            Signal::PropertiesChanged { changed, .. } => changed.contains(&(
                player::PLAYBACK_STATUS,
                PropertyValue::Str("Playing".to_string())
            )),
            _ => false,
        }));
    }

    #[tokio::test]
    async fn events_after_bridge_drop_are_rejected() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1)]));
        let (bridge, _sink) = attached(&player);
        let dispatcher = bridge.dispatcher();

        drop(bridge);
        tokio::task::yield_now().await;

        assert!(dispatcher.flush().await.is_err());
    }
}

mod track_list {
    use super::*;

    #[tokio::test]
    async fn replaced_list_is_signalled_with_ids() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1), track(2)]));
        let (bridge, sink) = attached(&player);

        bridge
            .dispatcher()
            .track_list_replaced(vec![track(1).id, track(2).id], track(1).id)
            .unwrap();
        bridge.dispatcher().flush().await.unwrap();

        assert_eq!(
            sink.take(),
            vec![Signal::TrackListReplaced {
                tracks: vec![track(1).id, track(2).id],
                current: track(1).id,
            }]
        );
    }

    #[tokio::test]
    async fn removal_is_signalled_after_confirmation() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1), track(2)]));
        let (bridge, sink) = attached(&player);

        bridge
            .track_list()
            .unwrap()
            .remove_track(&track(2).id)
            .unwrap();
        bridge.dispatcher().flush().await.unwrap();

        let signals = sink.take();
        assert_eq!(signals[0], Signal::TrackRemoved(track(2).id));
        assert_eq!(bridge.track_list().unwrap().tracks().unwrap(), vec![track(1).id]);
    }

    #[tokio::test]
    async fn metadata_change_carries_fresh_metadata() {
        let player = Arc::new(InMemoryPlayer::new(vec![track(1)]));
        let (bridge, sink) = attached(&player);

        bridge
            .dispatcher()
            .track_metadata_changed(track(1).id)
            .unwrap();
        bridge
            .dispatcher()
            .track_metadata_changed(track(7).id)
            .unwrap();
        bridge.dispatcher().flush().await.unwrap();

        let signals = sink.take();
        assert_eq!(signals.len(), 1);
        assert!(matches!(
            &signals[0],
            Signal::TrackMetadataChanged { track: id, metadata }
                if *id == track(1).id && metadata.track_id() == Some(&track(1).id)
        ));
    }
}
