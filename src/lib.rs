//! mpris-host - Expose a media player over MPRIS2.
//!
//! The crate bridges a host application's playback state to the four MPRIS2
//! D-Bus interfaces. The main pieces are:
//!
//! - Capability adapter traits the host implements
//! - A metadata builder mapping tracks to MPRIS metadata maps
//! - A property cache and serialized notifier emitting change signals
//! - An event dispatcher the host uses to report state changes
//! - zbus interface objects serving it all on a connection
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mpris_host::config::BridgeConfig;
//! use mpris_host::services::mpris::{InMemoryPlayer, MprisServer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let player = Arc::new(InMemoryPlayer::default());
//! let connection = zbus::Connection::session().await?;
//!
//! let server = MprisServer::serve(
//!     connection.clone(),
//!     player.adapters(),
//!     BridgeConfig::with_identity("Jukebox"),
//! )
//! .await?;
//! connection
//!     .request_name(MprisServer::bus_name("jukebox").as_str())
//!     .await?;
//!
//! // Report host-side changes as they happen.
//! server.bridge().dispatcher().track_changed()?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

/// Bridge configuration and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// MPRIS protocol services.
pub mod services;

/// Logging setup for processes hosting the bridge.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{BridgeError, Result};
