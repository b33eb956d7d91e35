use std::fmt;

/// Object path all four interfaces are served at.
pub const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

/// The four interfaces a player exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    /// `org.mpris.MediaPlayer2`
    Root,

    /// `org.mpris.MediaPlayer2.Player`
    Player,

    /// `org.mpris.MediaPlayer2.Playlists`
    Playlists,

    /// `org.mpris.MediaPlayer2.TrackList`
    TrackList,
}

impl Interface {
    /// Fully qualified D-Bus interface name
    pub fn name(self) -> &'static str {
        match self {
            Interface::Root => "org.mpris.MediaPlayer2",
            Interface::Player => "org.mpris.MediaPlayer2.Player",
            Interface::Playlists => "org.mpris.MediaPlayer2.Playlists",
            Interface::TrackList => "org.mpris.MediaPlayer2.TrackList",
        }
    }

    /// Every property the interface exposes.
    pub fn properties(self) -> &'static [&'static str] {
        use properties::{player, playlists, root, track_list};

        match self {
            Interface::Root => &[
                root::CAN_QUIT,
                root::CAN_RAISE,
                root::FULLSCREEN,
                root::CAN_SET_FULLSCREEN,
                root::HAS_TRACK_LIST,
                root::IDENTITY,
                root::DESKTOP_ENTRY,
                root::SUPPORTED_URI_SCHEMES,
                root::SUPPORTED_MIME_TYPES,
            ],
            Interface::Player => &[
                player::PLAYBACK_STATUS,
                player::LOOP_STATUS,
                player::RATE,
                player::SHUFFLE,
                player::METADATA,
                player::VOLUME,
                player::POSITION,
                player::MINIMUM_RATE,
                player::MAXIMUM_RATE,
                player::CAN_GO_NEXT,
                player::CAN_GO_PREVIOUS,
                player::CAN_PLAY,
                player::CAN_PAUSE,
                player::CAN_SEEK,
                player::CAN_CONTROL,
            ],
            Interface::Playlists => &[
                playlists::PLAYLIST_COUNT,
                playlists::ORDERINGS,
                playlists::ACTIVE_PLAYLIST,
            ],
            Interface::TrackList => &[track_list::TRACKS, track_list::CAN_EDIT_TRACKS],
        }
    }

    /// How changes to `property` are announced.
    pub fn cache_policy(self, property: &str) -> CachePolicy {
        match (self, property) {
            (Interface::Player, properties::player::POSITION) => CachePolicy::Uncached,
            (Interface::TrackList, properties::track_list::TRACKS) => CachePolicy::Invalidate,
            _ => CachePolicy::Emit,
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the notifier treats a property during a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Diffed against the cache; changes carry the new value.
    Emit,

    /// Diffed against the cache; changes are announced by name only.
    Invalidate,

    /// Continuous value, always read live and never announced.
    Uncached,
}

/// Property names, one module per interface.
pub mod properties {
    /// Property names of `org.mpris.MediaPlayer2`.
    pub mod root {
        #![allow(missing_docs)]

        pub const CAN_QUIT: &str = "CanQuit";
        pub const CAN_RAISE: &str = "CanRaise";
        pub const FULLSCREEN: &str = "Fullscreen";
        pub const CAN_SET_FULLSCREEN: &str = "CanSetFullscreen";
        pub const HAS_TRACK_LIST: &str = "HasTrackList";
        pub const IDENTITY: &str = "Identity";
        pub const DESKTOP_ENTRY: &str = "DesktopEntry";
        pub const SUPPORTED_URI_SCHEMES: &str = "SupportedUriSchemes";
        pub const SUPPORTED_MIME_TYPES: &str = "SupportedMimeTypes";
    }

    /// Property names of `org.mpris.MediaPlayer2.Player`.
    pub mod player {
        #![allow(missing_docs)]

        pub const PLAYBACK_STATUS: &str = "PlaybackStatus";
        pub const LOOP_STATUS: &str = "LoopStatus";
        pub const RATE: &str = "Rate";
        pub const SHUFFLE: &str = "Shuffle";
        pub const METADATA: &str = "Metadata";
        pub const VOLUME: &str = "Volume";
        pub const POSITION: &str = "Position";
        pub const MINIMUM_RATE: &str = "MinimumRate";
        pub const MAXIMUM_RATE: &str = "MaximumRate";
        pub const CAN_GO_NEXT: &str = "CanGoNext";
        pub const CAN_GO_PREVIOUS: &str = "CanGoPrevious";
        pub const CAN_PLAY: &str = "CanPlay";
        pub const CAN_PAUSE: &str = "CanPause";
        pub const CAN_SEEK: &str = "CanSeek";
        pub const CAN_CONTROL: &str = "CanControl";
    }

    /// Property names of `org.mpris.MediaPlayer2.Playlists`.
    pub mod playlists {
        #![allow(missing_docs)]

        pub const PLAYLIST_COUNT: &str = "PlaylistCount";
        pub const ORDERINGS: &str = "Orderings";
        pub const ACTIVE_PLAYLIST: &str = "ActivePlaylist";
    }

    /// Property names of `org.mpris.MediaPlayer2.TrackList`.
    pub mod track_list {
        #![allow(missing_docs)]

        pub const TRACKS: &str = "Tracks";
        pub const CAN_EDIT_TRACKS: &str = "CanEditTracks";
    }
}
