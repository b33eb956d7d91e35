//! MPRIS2 host-side bridge.
//!
//! Hosts implement the capability traits in [`adapter`], hand them to
//! [`MprisServer::serve`] (or [`MprisBridge::start`] with a custom
//! [`SignalSink`]), and report state changes through the returned
//! [`EventDispatcher`]. The bridge answers protocol calls, enforces capability
//! gates and fallbacks, and emits change signals through one serialized worker.

/// Capability traits implemented by the host
pub mod adapter;
/// Bridge lifecycle
pub mod bridge;
/// zbus interface objects and signal sink
pub mod dbus;
/// Adapter error types
pub mod error;
/// In-memory reference player
pub mod memory;
/// Track metadata maps
pub mod metadata;
/// Property cache, dispatcher, and notifier worker
pub mod notifier;
/// D-Bus server glue
pub mod server;
/// Protocol-facing interface behavior
pub mod surfaces;
/// Domain types
pub mod types;

pub use adapter::*;
pub use bridge::MprisBridge;
pub use error::{AdapterError, AdapterResult};
pub use memory::{Capabilities, InMemoryPlayer};
pub use metadata::{Metadata, MetadataValue};
pub use notifier::{EventDispatcher, PropertySource, PropertyValue, Signal, SignalSink};
pub use server::{BUS_NAME_PREFIX, MprisServer};
pub use surfaces::{PlayerSurface, PlaylistsSurface, RootSurface, Surfaces, TrackListSurface};
pub use types::*;
