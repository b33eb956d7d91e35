//! Serves an in-memory player over MPRIS on the session bus.
//!
//! Useful for poking at the bridge with `playerctl` or `busctl --user`.

use std::{error::Error, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use mpris_host::{
    config::{BridgeConfig, ConfigPaths},
    services::mpris::{
        Album, Artist, InMemoryPlayer, MprisServer, PlaylistEntry, PlaylistId, Track, TrackId,
    },
    tracing_config,
};
use tracing::{info, instrument};
use zbus::Connection;

#[derive(Parser)]
#[command(name = "mpris-host-demo")]
#[command(about = "Serve an in-memory media player over MPRIS")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the player until interrupted
    Serve {
        /// Player name appended to org.mpris.MediaPlayer2
        #[arg(short, long, default_value = "mpris_host_demo")]
        name: String,

        /// Configuration file, defaults to the user config if it exists
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the configuration JSON schema
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Schema) => {
            let schema = schemars::schema_for!(BridgeConfig);
            println!("{:#}", schema.as_value());
        }
        Some(Commands::Serve { name, config }) => {
            tracing_config::init()?;
            serve(&name, config).await?;
        }
        None => {
            tracing_config::init()?;
            serve("mpris_host_demo", None).await?;
        }
    }

    Ok(())
}

#[instrument]
async fn serve(name: &str, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = load_config(config)?;
    let player =
        Arc::new(InMemoryPlayer::new(sample_tracks()?).with_playlists(sample_playlists()?));

    let connection = Connection::session().await?;
    let server = MprisServer::serve(connection.clone(), player.adapters(), config).await?;
    player.attach(server.bridge().dispatcher());

    let bus_name = MprisServer::bus_name(name);
    connection.request_name(bus_name.as_str()).await?;
    info!(bus_name, "Serving in-memory player, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<BridgeConfig, Box<dyn Error>> {
    let path = match path {
        Some(path) => path,
        None => {
            let default = ConfigPaths::main_config()?;
            if !default.exists() {
                return Ok(BridgeConfig::with_identity("MPRIS Host Demo"));
            }
            default
        }
    };

    Ok(BridgeConfig::load(&path)?)
}

fn sample_tracks() -> Result<Vec<Track>, Box<dyn Error>> {
    let mut album = Album::new("Demo Sessions");
    album.artists = vec![Artist::new("The Placeholders")];

    let titles = ["Opening", "Interlude", "Finale"];
    let mut tracks = Vec::with_capacity(titles.len());

    for (index, title) in titles.iter().enumerate() {
        let number = u32::try_from(index + 1)?;
        let mut track = Track::new(
            TrackId::new(format!("/org/mpris/MediaPlayer2/Demo/Track{number}"))?,
            *title,
        );
        track.track_no = Some(number);
        track.length = 180_000_000;
        track.uri = Some(format!("file:///usr/share/sounds/demo/{number:02}.ogg"));
        track.artists = vec![Artist::new("The Placeholders")];
        track.album = Some(album.clone());
        tracks.push(track);
    }

    Ok(tracks)
}

fn sample_playlists() -> Result<Vec<PlaylistEntry>, Box<dyn Error>> {
    Ok(vec![
        PlaylistEntry::new(PlaylistId::new("/org/mpris/MediaPlayer2/Demo/Morning")?, "Morning"),
        PlaylistEntry::new(PlaylistId::new("/org/mpris/MediaPlayer2/Demo/Evening")?, "Evening"),
    ])
}
