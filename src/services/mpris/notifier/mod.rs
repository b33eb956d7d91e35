//! Change notification pipeline.
//!
//! Host events and successful inbound mutations are queued on one channel.
//! A single worker drains it, diffing properties against the cache and
//! emitting signals, so emissions for an interface never interleave.

mod cache;
mod dispatcher;
mod signals;
mod value;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

pub use cache::{ChangeSet, PropertyCache};
pub(crate) use dispatcher::Event;
pub use dispatcher::EventDispatcher;
pub use signals::{Signal, SignalSink};
pub use value::PropertyValue;

use super::{Interface, Metadata, TrackId, metadata::keys};
use crate::Result;

/// Live property getters the notifier diffs against its cache.
pub trait PropertySource: Send + Sync {
    /// Current value of `name` on `interface`.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is unknown or its getter failed.
    fn property(&self, interface: Interface, name: &str) -> Result<PropertyValue>;

    /// Metadata of a queued track, `None` if the track is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the host failed to look the track up.
    fn track_metadata(&self, track: &TrackId) -> Result<Option<Metadata>>;
}

/// The serialized emission path.
pub(crate) struct Notifier {
    cache: PropertyCache,
    source: Arc<dyn PropertySource>,
    sink: Arc<dyn SignalSink>,
}

impl Notifier {
    pub(crate) fn new(source: Arc<dyn PropertySource>, sink: Arc<dyn SignalSink>) -> Self {
        Self {
            cache: PropertyCache::new(),
            source,
            sink,
        }
    }

    /// Handles events until every dispatcher is dropped.
    #[instrument(skip_all)]
    pub(crate) async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        debug!("Notifier started");

        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }

        debug!("Notifier stopped, no dispatchers left");
    }

    async fn handle(&mut self, event: Event) {
        match event {
            Event::Refresh {
                interface,
                properties,
            } => self.refresh(interface, properties).await,
            Event::Signal(signal) => self.emit(signal).await,
            Event::TrackAdded { track, after } => {
                let metadata = self
                    .lookup_metadata(&track)
                    .unwrap_or_else(|| Metadata::new().with(keys::TRACK_ID, track));
                self.emit(Signal::TrackAdded { metadata, after }).await;
            }
            Event::TrackMetadataChanged(track) => {
                let Some(metadata) = self.lookup_metadata(&track) else {
                    debug!(%track, "Skipping metadata change for unknown track");
                    return;
                };
                self.emit(Signal::TrackMetadataChanged { track, metadata })
                    .await;
            }
            Event::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    /// Records the current value of every property without announcing it.
    pub(crate) fn prime(&mut self, interfaces: &[Interface]) {
        for &interface in interfaces {
            let values = self
                .cache
                .diff(interface, interface.properties(), self.source.as_ref());
            self.cache.commit(values);
        }
        debug!(?interfaces, "Property cache primed");
    }

    async fn refresh(&mut self, interface: Interface, properties: &[&'static str]) {
        let changes = self.cache.diff(interface, properties, self.source.as_ref());
        if changes.is_empty() {
            return;
        }

        match self.sink.emit(changes.to_signal()).await {
            Ok(()) => self.cache.commit(changes),
            Err(e) => warn!(%interface, error = %e, "Failed to emit property changes"),
        }
    }

    async fn emit(&self, signal: Signal) {
        let name = signal.name();
        if let Err(e) = self.sink.emit(signal).await {
            warn!(signal = name, error = %e, "Failed to emit signal");
        }
    }

    fn lookup_metadata(&self, track: &TrackId) -> Option<Metadata> {
        match self.source.track_metadata(track) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(%track, error = %e, "Failed to look up track metadata");
                None
            }
        }
    }
}
