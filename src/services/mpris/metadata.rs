use std::collections::{BTreeMap, HashMap};

use zbus::zvariant::{OwnedValue, Value};

use super::{Track, TrackId};
use crate::Result;

/// Metadata keys defined by the MPRIS and xesam vocabularies.
pub mod keys {
    /// Track identifier, object path
    pub const TRACK_ID: &str = "mpris:trackid";
    /// Track duration in microseconds
    pub const LENGTH: &str = "mpris:length";
    /// Artwork URL
    pub const ART_URL: &str = "mpris:artUrl";
    /// Track title
    pub const TITLE: &str = "xesam:title";
    /// Track artists
    pub const ARTIST: &str = "xesam:artist";
    /// Album name
    pub const ALBUM: &str = "xesam:album";
    /// Album artists
    pub const ALBUM_ARTIST: &str = "xesam:albumArtist";
    /// Position on the album
    pub const TRACK_NUMBER: &str = "xesam:trackNumber";
    /// Disc number
    pub const DISC_NUMBER: &str = "xesam:discNumber";
    /// Media location
    pub const URL: &str = "xesam:url";
}

/// A typed metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Object path
    ObjectPath(TrackId),
    /// UTF-8 string
    Str(String),
    /// String array
    Strings(Vec<String>),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit unsigned integer
    U64(u64),
    /// IEEE double
    F64(f64),
    /// Boolean
    Bool(bool),
}

impl MetadataValue {
    /// Wire representation
    pub fn to_value(&self) -> Value<'static> {
        match self {
            MetadataValue::ObjectPath(path) => Value::from(path.to_object_path()),
            MetadataValue::Str(s) => Value::from(s.clone()),
            MetadataValue::Strings(list) => Value::from(list.clone()),
            MetadataValue::I32(n) => Value::from(*n),
            MetadataValue::I64(n) => Value::from(*n),
            MetadataValue::U64(n) => Value::from(*n),
            MetadataValue::F64(n) => Value::from(*n),
            MetadataValue::Bool(b) => Value::from(*b),
        }
    }
}

impl From<TrackId> for MetadataValue {
    fn from(id: TrackId) -> Self {
        MetadataValue::ObjectPath(id)
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Str(s)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Str(s.to_string())
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(list: Vec<String>) -> Self {
        MetadataValue::Strings(list)
    }
}

impl From<i32> for MetadataValue {
    fn from(n: i32) -> Self {
        MetadataValue::I32(n)
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        MetadataValue::I64(n)
    }
}

impl From<u64> for MetadataValue {
    fn from(n: u64) -> Self {
        MetadataValue::U64(n)
    }
}

impl From<f64> for MetadataValue {
    fn from(n: f64) -> Self {
        MetadataValue::F64(n)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Bool(b)
    }
}

/// Metadata map describing one track.
///
/// Keys are only present when the corresponding field is set; there are no
/// null placeholders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata(BTreeMap<String, MetadataValue>);

impl Metadata {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style `insert`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over keys and values in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataValue)> {
        self.0.iter()
    }

    /// The track identifier, if the map carries a well-typed one.
    pub fn track_id(&self) -> Option<&TrackId> {
        match self.get(keys::TRACK_ID) {
            Some(MetadataValue::ObjectPath(id)) => Some(id),
            _ => None,
        }
    }

    /// The track length in microseconds, if the map carries one.
    pub fn length(&self) -> Option<i64> {
        match self.get(keys::LENGTH) {
            Some(MetadataValue::I64(n)) => Some(*n),
            Some(MetadataValue::I32(n)) => Some(i64::from(*n)),
            Some(MetadataValue::U64(n)) => Some(i64::try_from(*n).unwrap_or(i64::MAX)),
            _ => None,
        }
    }

    /// Wire map with each value wrapped in a variant.
    pub fn to_value_map(&self) -> HashMap<String, Value<'static>> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect()
    }

    /// Wire map in owned form, as returned from method calls and properties.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Marshalling` if a value cannot be converted.
    pub fn to_dbus(&self) -> Result<HashMap<String, OwnedValue>> {
        let mut map = HashMap::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            map.insert(key.clone(), OwnedValue::try_from(value.to_value())?);
        }
        Ok(map)
    }
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Builds the metadata map for the current track.
///
/// An `overridden` map from the host is returned verbatim. Otherwise a missing
/// track yields a map holding only the "no track" identifier. Artwork is taken
/// from the track, then its album, then `art_lookup` keyed by track number.
pub fn build(
    track: Option<&Track>,
    overridden: Option<Metadata>,
    art_lookup: impl FnOnce(Option<u32>) -> Option<String>,
) -> Metadata {
    if let Some(metadata) = overridden {
        return metadata;
    }

    let Some(track) = track else {
        return Metadata::new().with(keys::TRACK_ID, TrackId::no_track());
    };

    let mut metadata = Metadata::new()
        .with(keys::TRACK_ID, track.id.clone())
        .with(keys::TITLE, track.name.clone())
        .with(keys::LENGTH, track.length_micros())
        .with(keys::ARTIST, artist_names(&track.artists));

    if let Some(album) = &track.album {
        metadata.insert(keys::ALBUM, album.name.clone());
        metadata.insert(keys::ALBUM_ARTIST, artist_names(&album.artists));
    }

    if let Some(number) = track.track_no.and_then(|n| i32::try_from(n).ok()) {
        metadata.insert(keys::TRACK_NUMBER, number);
    }

    if let Some(number) = track.disc_no.and_then(|n| i32::try_from(n).ok()) {
        metadata.insert(keys::DISC_NUMBER, number);
    }

    if let Some(uri) = &track.uri {
        metadata.insert(keys::URL, uri.clone());
    }

    let art_url = track
        .art_url
        .clone()
        .or_else(|| track.album.as_ref().and_then(|album| album.art_url.clone()))
        .or_else(|| art_lookup(track.track_no));

    if let Some(art_url) = art_url {
        metadata.insert(keys::ART_URL, art_url);
    }

    metadata
}

fn artist_names(artists: &[super::Artist]) -> Vec<String> {
    artists.iter().map(|artist| artist.name.clone()).collect()
}
