//! Song domain type
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A playable track
///
/// Identity is the `path`: two records with the same path are the same
/// track, regardless of their other fields. Local tracks use a filesystem
/// path, online tracks a provider-specific identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Stable unique identifier (file path or provider path)
    pub path: String,

    /// Display title
    pub name: String,

    /// Whether the track streams from a remote provider
    #[serde(default)]
    pub is_online: bool,

    /// Provider reference (online tracks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bv_id: Option<String>,

    /// Provider page/part number (online tracks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Whether a local copy of a formerly online track exists
    #[serde(default)]
    pub is_downloaded: bool,
}

impl Song {
    /// Create a local track
    pub fn local(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            is_online: false,
            bv_id: None,
            page: None,
            is_downloaded: false,
        }
    }

    /// Create an online track with its provider reference
    pub fn online(
        path: impl Into<String>,
        name: impl Into<String>,
        bv_id: impl Into<String>,
        page: u32,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            is_online: true,
            bv_id: Some(bv_id.into()),
            page: Some(page),
            is_downloaded: false,
        }
    }

    /// Create the local record of a track that finished downloading
    ///
    /// Online-only fields are cleared.
    pub fn downloaded(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_downloaded: true,
            ..Self::local(path, name)
        }
    }
}

/// Position of the song with `path` in `songs`
pub fn position_of(songs: &[Song], path: &str) -> Option<usize> {
    songs.iter().position(|s| s.path == path)
}

/// Whether `songs` contains an entry with `path`
pub fn contains_path(songs: &[Song], path: &str) -> bool {
    songs.iter().any(|s| s.path == path)
}

/// Drop later entries whose path already appeared
pub fn dedup_by_path(songs: Vec<Song>) -> Vec<Song> {
    let mut seen = std::collections::HashSet::with_capacity(songs.len());
    songs
        .into_iter()
        .filter(|s| seen.insert(s.path.clone()))
        .collect()
}

/// Union of two song lists keyed by path
///
/// Songs already in `origin` keep their position but take the record from
/// `addition` when both contain the same path. New paths are appended in
/// `addition` order.
pub fn merge_unique(origin: &[Song], addition: &[Song]) -> Vec<Song> {
    let mut merged: Vec<Song> = dedup_by_path(origin.to_vec());
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, s)| (s.path.clone(), i))
        .collect();

    for song in addition {
        match index.get(&song.path) {
            Some(&i) => merged[i] = song.clone(),
            None => {
                index.insert(song.path.clone(), merged.len());
                merged.push(song.clone());
            }
        }
    }

    merged
}
