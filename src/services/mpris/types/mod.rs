/// Interface names, property names, and cache policies
pub mod interface;
/// Playback state and mode types
pub mod playback;
/// Playlist entries and orderings
pub mod playlist;
/// Track, album, and artist value types
pub mod track;

pub use interface::*;
pub use playback::*;
pub use playlist::*;
pub use track::*;
