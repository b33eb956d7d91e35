use std::collections::HashMap;

use async_trait::async_trait;
use zbus::{Connection, names::BusName, object_server::SignalEmitter, zvariant::Value};

use super::{PlayerInterface, PlaylistsInterface, TrackListInterface};
use crate::Result;
use crate::services::mpris::{OBJECT_PATH, Signal, SignalSink, TrackId};

const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Emits bridge signals from the MPRIS object path on a bus connection.
#[derive(Debug, Clone)]
pub struct DbusSignalSink {
    connection: Connection,
}

impl DbusSignalSink {
    /// Emit on `connection`.
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    async fn properties_changed(
        &self,
        interface: &str,
        changed: HashMap<&str, Value<'_>>,
        invalidated: Vec<&str>,
    ) -> Result<()> {
        self.connection
            .emit_signal(
                None::<BusName<'_>>,
                OBJECT_PATH,
                PROPERTIES_INTERFACE,
                "PropertiesChanged",
                &(interface, changed, invalidated),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SignalSink for DbusSignalSink {
    async fn emit(&self, signal: Signal) -> Result<()> {
        let emitter = SignalEmitter::new(&self.connection, OBJECT_PATH)?;

        match signal {
            Signal::PropertiesChanged {
                interface,
                changed,
                invalidated,
            } => {
                let changed = changed
                    .iter()
                    .map(|(name, value)| (*name, value.to_value()))
                    .collect();
                self.properties_changed(interface.name(), changed, invalidated)
                    .await?;
            }
            Signal::Seeked(position) => {
                PlayerInterface::seeked(&emitter, position).await?;
            }
            Signal::TrackListReplaced { tracks, current } => {
                let tracks = tracks.iter().map(TrackId::to_object_path).collect();
                TrackListInterface::track_list_replaced(&emitter, tracks, current.to_object_path())
                    .await?;
            }
            Signal::TrackAdded { metadata, after } => {
                TrackListInterface::track_added(
                    &emitter,
                    metadata.to_dbus()?,
                    after.to_object_path(),
                )
                .await?;
            }
            Signal::TrackRemoved(track) => {
                TrackListInterface::track_removed(&emitter, track.to_object_path()).await?;
            }
            Signal::TrackMetadataChanged { track, metadata } => {
                TrackListInterface::track_metadata_changed(
                    &emitter,
                    track.to_object_path(),
                    metadata.to_dbus()?,
                )
                .await?;
            }
            Signal::PlaylistChanged(playlist) => {
                PlaylistsInterface::playlist_changed(&emitter, playlist.to_tuple()).await?;
            }
        }

        Ok(())
    }
}
