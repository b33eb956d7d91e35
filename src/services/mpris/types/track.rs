crate::object_path_id! {
    /// Unique identifier of a track on the bus.
    TrackId
}

/// Object path reserved for "no track".
pub const NO_TRACK_PATH: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";

impl TrackId {
    /// The reserved identifier meaning "no track".
    pub fn no_track() -> Self {
        Self::from(zbus::zvariant::ObjectPath::from_static_str_unchecked(
            NO_TRACK_PATH,
        ))
    }

    /// Whether this is the reserved "no track" identifier.
    pub fn is_no_track(&self) -> bool {
        self.as_str() == NO_TRACK_PATH
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::no_track()
    }
}

/// A performing artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    /// Artist name
    pub name: String,
}

impl Artist {
    /// Create an artist with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Artist {
    fn default() -> Self {
        Self::new("Default Artist")
    }
}

/// An album a track belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Album name
    pub name: String,

    /// Album artists, in credit order
    pub artists: Vec<Artist>,

    /// URL to album artwork image
    pub art_url: Option<String>,
}

impl Album {
    /// Create an album with no artists or artwork
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artists: Vec::new(),
            art_url: None,
        }
    }
}

impl Default for Album {
    fn default() -> Self {
        Self::new("Default Album")
    }
}

/// A playable track as reported by the host.
///
/// Rebuilt by the host for every call; the bridge never keeps one around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub name: String,

    /// Position of the track on its album
    pub track_no: Option<u32>,

    /// Track duration in microseconds
    pub length: u64,

    /// Location of the media file
    pub uri: Option<String>,

    /// Track artists, in credit order
    pub artists: Vec<Artist>,

    /// Album the track belongs to
    pub album: Option<Album>,

    /// URL to track artwork image
    pub art_url: Option<String>,

    /// Disc the track is on
    pub disc_no: Option<u32>,

    /// Free-form media type tag, e.g. "audio" or "video"
    pub kind: Option<String>,
}

impl Track {
    /// Create a track with the given identifier and title
    pub fn new(id: TrackId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Length as the signed microsecond count used on the wire.
    pub fn length_micros(&self) -> i64 {
        i64::try_from(self.length).unwrap_or(i64::MAX)
    }
}

impl Default for Track {
    fn default() -> Self {
        Self {
            id: TrackId::no_track(),
            name: "Default Track".to_string(),
            track_no: None,
            length: 0,
            uri: None,
            artists: Vec::new(),
            album: None,
            art_url: None,
            disc_no: None,
            kind: None,
        }
    }
}
