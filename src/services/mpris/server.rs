use std::sync::Arc;

use tracing::{info, instrument};
use zbus::Connection;

use super::{
    Adapters, MprisBridge, OBJECT_PATH,
    dbus::{
        DbusSignalSink, PlayerInterface, PlaylistsInterface, RootInterface, TrackListInterface,
    },
};
use crate::Result;
use crate::config::BridgeConfig;

/// Well-known bus name prefix every MPRIS player registers under.
pub const BUS_NAME_PREFIX: &str = "org.mpris.MediaPlayer2";

/// Serves a bridge on a D-Bus connection.
pub struct MprisServer {
    bridge: MprisBridge,
    connection: Connection,
}

impl MprisServer {
    /// Registers the MPRIS objects on `connection` and starts emitting.
    ///
    /// Requesting the well-known name (see [`MprisServer::bus_name`]) is left
    /// to the caller, after this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or an object cannot be
    /// registered.
    #[instrument(skip_all, fields(identity = %config.identity))]
    pub async fn serve(
        connection: Connection,
        adapters: Adapters,
        config: BridgeConfig,
    ) -> Result<Self> {
        let sink = Arc::new(DbusSignalSink::new(connection.clone()));
        let bridge = MprisBridge::start(adapters, config, sink)?;
        let surfaces = bridge.surfaces();

        let objects = connection.object_server();
        objects
            .at(OBJECT_PATH, RootInterface::new(surfaces.root.clone()))
            .await?;
        objects
            .at(OBJECT_PATH, PlayerInterface::new(surfaces.player.clone()))
            .await?;
        if let Some(playlists) = &surfaces.playlists {
            objects
                .at(OBJECT_PATH, PlaylistsInterface::new(playlists.clone()))
                .await?;
        }
        if let Some(track_list) = &surfaces.track_list {
            objects
                .at(OBJECT_PATH, TrackListInterface::new(track_list.clone()))
                .await?;
        }

        info!(path = OBJECT_PATH, "MPRIS objects registered");

        Ok(Self { bridge, connection })
    }

    /// Well-known name for a player called `player`.
    pub fn bus_name(player: &str) -> String {
        format!("{BUS_NAME_PREFIX}.{player}")
    }

    /// The running bridge.
    pub fn bridge(&self) -> &MprisBridge {
        &self.bridge
    }

    /// Connection the objects are served on.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}
