//! zbus objects serving the surfaces on the bus.

mod interfaces;
mod sink;

pub use interfaces::{PlayerInterface, PlaylistsInterface, RootInterface, TrackListInterface};
pub use sink::DbusSignalSink;
