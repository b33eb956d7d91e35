use zbus::zvariant::{OwnedValue, Value};

use crate::Result;
use crate::services::mpris::{ActivePlaylist, Metadata, TrackId};

/// Snapshot of a property value, compared structurally by the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Boolean
    Bool(bool),
    /// UTF-8 string
    Str(String),
    /// String array
    Strings(Vec<String>),
    /// IEEE double
    F64(f64),
    /// 64-bit signed integer
    I64(i64),
    /// 32-bit unsigned integer
    U32(u32),
    /// Object path array
    Paths(Vec<TrackId>),
    /// Metadata map
    Metadata(Metadata),
    /// Active playlist structure
    ActivePlaylist(ActivePlaylist),
}

impl PropertyValue {
    /// Wire representation
    pub fn to_value(&self) -> Value<'static> {
        match self {
            PropertyValue::Bool(b) => Value::from(*b),
            PropertyValue::Str(s) => Value::from(s.clone()),
            PropertyValue::Strings(list) => Value::from(list.clone()),
            PropertyValue::F64(n) => Value::from(*n),
            PropertyValue::I64(n) => Value::from(*n),
            PropertyValue::U32(n) => Value::from(*n),
            PropertyValue::Paths(ids) => Value::from(
                ids.iter()
                    .map(TrackId::to_object_path)
                    .collect::<Vec<_>>(),
            ),
            PropertyValue::Metadata(metadata) => Value::from(metadata.to_value_map()),
            PropertyValue::ActivePlaylist(active) => Value::from((
                active.valid,
                (
                    active.entry.id.to_object_path(),
                    active.entry.name.clone(),
                    active.entry.icon.clone().unwrap_or_default(),
                ),
            )),
        }
    }

    /// Owned wire representation
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Marshalling` if the value cannot be converted.
    pub fn to_owned_value(&self) -> Result<OwnedValue> {
        Ok(OwnedValue::try_from(self.to_value())?)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Str(s)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(list: Vec<String>) -> Self {
        PropertyValue::Strings(list)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::F64(n)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::I64(n)
    }
}

impl From<u32> for PropertyValue {
    fn from(n: u32) -> Self {
        PropertyValue::U32(n)
    }
}

impl From<Vec<TrackId>> for PropertyValue {
    fn from(ids: Vec<TrackId>) -> Self {
        PropertyValue::Paths(ids)
    }
}

impl From<Metadata> for PropertyValue {
    fn from(metadata: Metadata) -> Self {
        PropertyValue::Metadata(metadata)
    }
}

impl From<ActivePlaylist> for PropertyValue {
    fn from(active: ActivePlaylist) -> Self {
        PropertyValue::ActivePlaylist(active)
    }
}
