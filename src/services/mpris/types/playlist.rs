use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use zbus::zvariant::OwnedObjectPath;

use crate::BridgeError;

crate::object_path_id! {
    /// Unique identifier of a playlist on the bus.
    PlaylistId
}

/// Wire form of a playlist: identifier, name, icon URI.
pub type PlaylistTuple = (OwnedObjectPath, String, String);

/// A playlist as reported by the host.
///
/// Timestamps are only used to sort by the date-based orderings and never
/// leave the process.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// URI of an icon for the playlist
    pub icon: Option<String>,

    /// When the playlist was created
    pub created: Option<DateTime<Utc>>,

    /// When the playlist was last modified
    pub modified: Option<DateTime<Utc>>,

    /// When the playlist was last played
    pub last_played: Option<DateTime<Utc>>,
}

impl PlaylistEntry {
    /// Create an entry with no icon or timestamps
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: None,
            created: None,
            modified: None,
            last_played: None,
        }
    }

    /// Set the icon URI
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Placeholder entry paired with an invalid active playlist.
    pub fn placeholder() -> Self {
        Self::new(
            PlaylistId::from(zbus::zvariant::ObjectPath::from_static_str_unchecked("/")),
            "",
        )
    }

    /// Wire representation; a missing icon becomes an empty string.
    pub fn to_tuple(&self) -> PlaylistTuple {
        (
            self.id.to_owned_path(),
            self.name.clone(),
            self.icon.clone().unwrap_or_default(),
        )
    }
}

/// The player's active playlist, if it has one.
///
/// When `valid` is false the entry is a placeholder and carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePlaylist {
    /// Whether `entry` refers to a real playlist
    pub valid: bool,

    /// The active playlist, or a placeholder
    pub entry: PlaylistEntry,
}

impl ActivePlaylist {
    /// No playlist is active.
    pub fn none() -> Self {
        Self {
            valid: false,
            entry: PlaylistEntry::placeholder(),
        }
    }

    /// Wire representation
    pub fn to_tuple(&self) -> (bool, PlaylistTuple) {
        (self.valid, self.entry.to_tuple())
    }
}

impl From<Option<PlaylistEntry>> for ActivePlaylist {
    fn from(entry: Option<PlaylistEntry>) -> Self {
        match entry {
            Some(entry) => Self { valid: true, entry },
            None => Self::none(),
        }
    }
}

/// Sort key for playlist listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PlaylistOrdering {
    /// By playlist name
    Alphabetical,

    /// By creation date, oldest first
    CreationDate,

    /// By last modification date, oldest first
    ModifiedDate,

    /// By last playback date, oldest first
    LastPlayDate,

    /// In the order the host lists them
    UserDefined,
}

impl PlaylistOrdering {
    /// Wire representation of the ordering
    pub fn as_str(self) -> &'static str {
        match self {
            PlaylistOrdering::Alphabetical => "Alphabetical",
            PlaylistOrdering::CreationDate => "CreationDate",
            PlaylistOrdering::ModifiedDate => "ModifiedDate",
            PlaylistOrdering::LastPlayDate => "LastPlayDate",
            PlaylistOrdering::UserDefined => "UserDefined",
        }
    }

    /// Sorts `entries` ascending by this key.
    ///
    /// The sort is stable, so entries with equal keys keep the host's order.
    /// Entries without the relevant timestamp sort first.
    pub fn sort(self, entries: &mut [PlaylistEntry]) {
        match self {
            PlaylistOrdering::Alphabetical => {
                entries.sort_by_cached_key(|entry| entry.name.to_lowercase());
            }
            PlaylistOrdering::CreationDate => entries.sort_by_key(|entry| entry.created),
            PlaylistOrdering::ModifiedDate => entries.sort_by_key(|entry| entry.modified),
            PlaylistOrdering::LastPlayDate => entries.sort_by_key(|entry| entry.last_played),
            PlaylistOrdering::UserDefined => {}
        }
    }
}

impl FromStr for PlaylistOrdering {
    type Err = BridgeError;

    fn from_str(ordering: &str) -> Result<Self, Self::Err> {
        match ordering {
            "Alphabetical" => Ok(Self::Alphabetical),
            "CreationDate" => Ok(Self::CreationDate),
            "ModifiedDate" => Ok(Self::ModifiedDate),
            "LastPlayDate" => Ok(Self::LastPlayDate),
            "UserDefined" => Ok(Self::UserDefined),
            other => Err(BridgeError::invalid_enum("playlist ordering", other)),
        }
    }
}

impl fmt::Display for PlaylistOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(name: &str) -> PlaylistEntry {
        PlaylistEntry::new(PlaylistId::new(format!("/playlist/{name}")).unwrap(), name)
    }

    #[test]
    fn alphabetical_ignores_case() {
        let mut entries = vec![entry("beta"), entry("Alpha"), entry("gamma")];

        PlaylistOrdering::Alphabetical.sort(&mut entries);

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn creation_date_puts_undated_first() {
        let mut old = entry("old");
        old.created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).single();
        let mut new = entry("new");
        new.created = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single();
        let mut entries = vec![new, entry("undated"), old];

        PlaylistOrdering::CreationDate.sort(&mut entries);

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["undated", "old", "new"]);
    }

    #[test]
    fn user_defined_keeps_host_order() {
        let mut entries = vec![entry("c"), entry("a"), entry("b")];

        PlaylistOrdering::UserDefined.sort(&mut entries);

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn invalid_active_playlist_uses_placeholder() {
        let active = ActivePlaylist::from(None);

        let (valid, (path, name, icon)) = active.to_tuple();
        assert!(!valid);
        assert_eq!(path.as_str(), "/");
        assert!(name.is_empty());
        assert!(icon.is_empty());
    }

    #[test]
    fn rejects_unknown_ordering() {
        assert!("Random".parse::<PlaylistOrdering>().is_err());
        assert_eq!(
            "LastPlayDate".parse::<PlaylistOrdering>().unwrap(),
            PlaylistOrdering::LastPlayDate
        );
    }
}
