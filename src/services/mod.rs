/// Shared helpers for service implementations
pub mod common;
/// MPRIS protocol bridge
pub mod mpris;

pub use mpris::{EventDispatcher, MprisBridge, MprisServer};
