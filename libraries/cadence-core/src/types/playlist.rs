//! Playlist domain types
use crate::types::{song, PlaylistId, Song};
use serde::{Deserialize, Serialize};

/// What kind of collection a playlist is
///
/// System kinds own a reserved id and are never created twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistKind {
    /// Created by the user
    #[default]
    User,
    /// Mirror of the local library
    LocalLibrary,
    /// The user's favorites
    Favorites,
}

impl PlaylistKind {
    /// Reserved id for system kinds
    pub fn reserved_id(self) -> Option<PlaylistId> {
        match self {
            PlaylistKind::User => None,
            PlaylistKind::LocalLibrary => Some(PlaylistId::local_library()),
            PlaylistKind::Favorites => Some(PlaylistId::favorites()),
        }
    }

    /// Whether the kind is a reserved system collection
    pub fn is_system(self) -> bool {
        self != PlaylistKind::User
    }

    /// Convert kind to string for database storage
    pub fn as_str(self) -> &'static str {
        match self {
            PlaylistKind::User => "user",
            PlaylistKind::LocalLibrary => "locallibrary",
            PlaylistKind::Favorites => "favorites",
        }
    }

    /// Parse kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(PlaylistKind::User),
            "locallibrary" => Some(PlaylistKind::LocalLibrary),
            "favorites" => Some(PlaylistKind::Favorites),
            _ => None,
        }
    }
}

/// Named, ordered song collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Songs in insertion order
    #[serde(default)]
    pub songs: Vec<Song>,

    /// Collection kind
    #[serde(default)]
    pub kind: PlaylistKind,
}

impl Playlist {
    /// Create an empty user playlist with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            songs: Vec::new(),
            kind: PlaylistKind::User,
        }
    }

    /// Create an empty system playlist under its reserved id
    ///
    /// Returns `None` for `PlaylistKind::User`.
    pub fn system(kind: PlaylistKind, name: impl Into<String>) -> Option<Self> {
        kind.reserved_id().map(|id| Self {
            id,
            name: name.into(),
            songs: Vec::new(),
            kind,
        })
    }

    /// Whether this is a system playlist
    pub fn is_system(&self) -> bool {
        self.kind.is_system()
    }

    /// Whether the playlist holds a song with `path`
    pub fn contains(&self, path: &str) -> bool {
        song::contains_path(&self.songs, path)
    }
}
