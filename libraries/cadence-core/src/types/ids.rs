//! ID types for Cadence entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Playlist identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Reserved id of the local-library mirror playlist
    pub const LOCAL_LIBRARY: &'static str = "local";

    /// Reserved id of the favorites playlist
    pub const FAVORITES: &'static str = "favorites";

    /// Create a playlist ID from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random playlist ID
    ///
    /// Never collides with a reserved id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The local-library playlist ID
    pub fn local_library() -> Self {
        Self::new(Self::LOCAL_LIBRARY)
    }

    /// The favorites playlist ID
    pub fn favorites() -> Self {
        Self::new(Self::FAVORITES)
    }

    /// Whether this is one of the reserved system ids
    pub fn is_reserved(&self) -> bool {
        self.0 == Self::LOCAL_LIBRARY || self.0 == Self::FAVORITES
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlaylistId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
