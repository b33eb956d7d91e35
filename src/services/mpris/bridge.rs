use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, instrument};

use super::{
    Adapters, EventDispatcher, Interface, PlayerSurface, PlaylistsSurface, PropertySource,
    RootSurface, SignalSink, Surfaces, TrackListSurface, notifier::Notifier,
};
use crate::Result;
use crate::config::BridgeConfig;

/// A running bridge: the surfaces plus the notifier worker behind them.
///
/// Dropping the bridge stops the worker.
pub struct MprisBridge {
    surfaces: Surfaces,
    dispatcher: EventDispatcher,
    worker: JoinHandle<()>,
}

impl MprisBridge {
    /// Validates `config`, wires the surfaces to `adapters`, and spawns the
    /// notifier worker emitting into `sink`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::ConfigValidation` if the configuration is invalid.
    #[instrument(skip_all, fields(identity = %config.identity))]
    pub fn start(
        adapters: Adapters,
        config: BridgeConfig,
        sink: Arc<dyn SignalSink>,
    ) -> Result<Self> {
        config.validate()?;

        let (dispatcher, events) = EventDispatcher::channel();
        let surfaces = Surfaces::new(adapters, Arc::new(config), dispatcher.clone());

        let mut served = vec![Interface::Root, Interface::Player];
        if surfaces.playlists.is_some() {
            served.push(Interface::Playlists);
        }
        if surfaces.track_list.is_some() {
            served.push(Interface::TrackList);
        }
        let source: Arc<dyn PropertySource> = Arc::new(surfaces.clone());
        let mut notifier = Notifier::new(source, sink);
        notifier.prime(&served);
        let worker = tokio::spawn(notifier.run(events));

        info!("MPRIS bridge started");

        Ok(Self {
            surfaces,
            dispatcher,
            worker,
        })
    }

    /// Handle for reporting host state changes.
    pub fn dispatcher(&self) -> EventDispatcher {
        self.dispatcher.clone()
    }

    /// Every served surface.
    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    /// `org.mpris.MediaPlayer2`
    pub fn root(&self) -> &RootSurface {
        &self.surfaces.root
    }

    /// `org.mpris.MediaPlayer2.Player`
    pub fn player(&self) -> &PlayerSurface {
        &self.surfaces.player
    }

    /// `org.mpris.MediaPlayer2.Playlists`, if served
    pub fn playlists(&self) -> Option<&PlaylistsSurface> {
        self.surfaces.playlists.as_ref()
    }

    /// `org.mpris.MediaPlayer2.TrackList`, if served
    pub fn track_list(&self) -> Option<&TrackListSurface> {
        self.surfaces.track_list.as_ref()
    }
}

impl Drop for MprisBridge {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
