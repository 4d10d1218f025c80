//! Playlist collection
//!
//! Two system playlists live next to the user's own: the local-library
//! mirror and favorites. They are told apart by `PlaylistKind`, never by
//! name, and always sit at their reserved ids.

use crate::reconcile::rewrite_songs;
use cadence_core::{dedup_by_path, merge_unique, Playlist, PlaylistId, PlaylistKind, Song};

/// In-memory playlist collection
///
/// Every mutator returns whether anything changed; the caller persists the
/// whole collection only then.
#[derive(Debug, Clone, Default)]
pub struct PlaylistCollection {
    playlists: Vec<Playlist>,
}

impl PlaylistCollection {
    /// Wrap a loaded collection
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self { playlists }
    }

    /// All playlists in display order
    pub fn all(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// Check if there are no playlists
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Look up a playlist by id
    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    fn get_mut(&mut self, id: &PlaylistId) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| &p.id == id)
    }

    /// Swap in a freshly loaded collection
    pub fn replace_all(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;
    }

    /// Create an empty user playlist and return its id
    pub fn create(&mut self, name: impl Into<String>) -> PlaylistId {
        let playlist = Playlist::new(name);
        let id = playlist.id.clone();
        tracing::debug!("Created playlist {} ({})", playlist.name, id);
        self.playlists.push(playlist);
        id
    }

    /// Create the system playlist of `kind` unless its reserved id exists
    ///
    /// Returns true if a playlist was added.
    pub fn ensure_system(&mut self, kind: PlaylistKind, name: impl Into<String>) -> bool {
        let Some(playlist) = Playlist::system(kind, name) else {
            return false;
        };
        if self.get(&playlist.id).is_some() {
            return false;
        }

        tracing::info!("Creating system playlist {}", playlist.id);
        self.playlists.push(playlist);
        true
    }

    /// Remove the playlist with `id`
    ///
    /// System playlists are not protected; they come back on the next start.
    pub fn delete(&mut self, id: &PlaylistId) -> Option<Playlist> {
        let index = self.playlists.iter().position(|p| &p.id == id)?;
        let removed = self.playlists.remove(index);
        if removed.is_system() {
            tracing::warn!("System playlist {} deleted", removed.id);
        }
        Some(removed)
    }

    /// Append `song` to one playlist unless its path is already there
    pub fn add_song(&mut self, id: &PlaylistId, song: Song) -> bool {
        match self.get_mut(id) {
            Some(playlist) if !playlist.contains(&song.path) => {
                playlist.songs.push(song);
                true
            }
            _ => false,
        }
    }

    /// Remove the song with `path` from one playlist
    pub fn remove_song(&mut self, id: &PlaylistId, path: &str) -> bool {
        let Some(playlist) = self.get_mut(id) else {
            return false;
        };
        let before = playlist.songs.len();
        playlist.songs.retain(|s| s.path != path);
        playlist.songs.len() != before
    }

    /// Replace one playlist's songs wholesale
    pub fn update_songs(&mut self, id: &PlaylistId, songs: Vec<Song>) -> bool {
        match self.get_mut(id) {
            Some(playlist) => {
                playlist.songs = dedup_by_path(songs);
                true
            }
            None => false,
        }
    }

    /// Rename one playlist
    pub fn rename(&mut self, id: &PlaylistId, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(playlist) => {
                playlist.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Whether the favorites playlist holds `path`
    pub fn is_favorite(&self, path: &str) -> bool {
        self.get(&PlaylistId::favorites())
            .is_some_and(|p| p.contains(path))
    }

    /// Add or remove `song` from favorites, creating the playlist if needed
    ///
    /// Returns the new favorite state.
    pub fn toggle_favorite(&mut self, song: Song, favorites_name: &str) -> bool {
        let id = PlaylistId::favorites();
        self.ensure_system(PlaylistKind::Favorites, favorites_name);

        if self.remove_song(&id, &song.path) {
            false
        } else {
            self.add_song(&id, song)
        }
    }

    /// Swap `replacement` in for `old_path` across every playlist
    ///
    /// The local-library playlist also receives the record if it lacks it.
    /// Returns true if any playlist changed.
    pub fn rewrite_song(&mut self, old_path: &str, replacement: &Song) -> bool {
        let mut changed = false;
        for playlist in &mut self.playlists {
            changed |= rewrite_songs(&mut playlist.songs, old_path, replacement);
        }

        changed | self.add_song(&PlaylistId::local_library(), replacement.clone())
    }

    /// Merge scanned songs into the local-library playlist
    pub fn merge_into_local_library(&mut self, songs: &[Song]) -> bool {
        match self.get_mut(&PlaylistId::local_library()) {
            Some(playlist) => {
                let merged = merge_unique(&playlist.songs, songs);
                let changed = merged != playlist.songs;
                playlist.songs = merged;
                changed
            }
            None => false,
        }
    }
}
