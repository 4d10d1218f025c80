//! Play queue with shuffle snapshot
//!
//! Structure while shuffled:
//! ```text
//! live:     C  A  D  B     (playback order)
//! snapshot: A  B  C  D     (canonical order, persisted)
//! current:  "D"            (path, resolved against live)
//! ```
//!
//! Both lists always hold the same set of paths. Without shuffle there is no
//! snapshot and the live list is the canonical order.

use crate::shuffle::shuffle_songs;
use cadence_core::{contains_path, dedup_by_path, merge_unique, position_of, Song};
use rand::Rng;

/// Ordered songs of the active session
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    /// Playback order
    songs: Vec<Song>,

    /// Order before shuffle (for restoring and persisting)
    original: Option<Vec<Song>>,

    /// Path of the current song, always present in `songs`
    current: Option<String>,
}

impl PlayQueue {
    /// Create an unshuffled queue with no current song
    ///
    /// Duplicate paths are dropped, keeping the first occurrence.
    pub fn new(songs: Vec<Song>) -> Self {
        Self {
            songs: dedup_by_path(songs),
            original: None,
            current: None,
        }
    }

    /// Songs in playback order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Unshuffled order, the one that gets persisted
    pub fn canonical(&self) -> &[Song] {
        self.original.as_deref().unwrap_or(&self.songs)
    }

    /// Pre-shuffle snapshot, present only while shuffled
    pub fn snapshot(&self) -> Option<&[Song]> {
        self.original.as_deref()
    }

    /// Whether a shuffle snapshot is held
    pub fn is_shuffled(&self) -> bool {
        self.original.is_some()
    }

    /// Number of songs in the queue
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Whether a song with `path` is queued
    pub fn contains(&self, path: &str) -> bool {
        contains_path(&self.songs, path)
    }

    /// Path of the current song
    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The current song record
    pub fn current(&self) -> Option<&Song> {
        self.current_index().map(|i| &self.songs[i])
    }

    /// Index of the current song in playback order
    pub fn current_index(&self) -> Option<usize> {
        self.current
            .as_deref()
            .and_then(|path| position_of(&self.songs, path))
    }

    /// Make the queued song with `path` current
    ///
    /// Returns false when the path is not queued.
    pub fn select(&mut self, path: &str) -> bool {
        if !self.contains(path) {
            return false;
        }
        self.current = Some(path.to_string());
        true
    }

    /// Make the song at `index` current
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.songs.get(index) {
            Some(song) => {
                self.current = Some(song.path.clone());
                true
            }
            None => false,
        }
    }

    /// Insert `song` right after the current song (end if none)
    ///
    /// While shuffled the snapshot gets the song after the current song's
    /// snapshot position as well. Returns false if the path is already queued.
    pub fn insert_after_current(&mut self, song: Song) -> bool {
        if self.contains(&song.path) {
            return false;
        }

        let current = self.current.as_deref();
        if let Some(original) = self.original.as_mut() {
            insert_after(original, current, song.clone());
        }
        insert_after(&mut self.songs, current, song);
        true
    }

    /// Merge `songs` in: queued paths take the new record in place, the
    /// rest go to the end in input order
    ///
    /// While shuffled the snapshot is merged the same way. Returns true if
    /// the queue changed.
    pub fn append(&mut self, songs: &[Song]) -> bool {
        let merged = merge_unique(&self.songs, songs);
        if merged == self.songs {
            return false;
        }
        self.songs = merged;

        if let Some(original) = self.original.as_mut() {
            *original = merge_unique(original, songs);
        }
        true
    }

    /// Remove the song with `path` from both lists
    ///
    /// If it was current, the first remaining song becomes current (none when
    /// the queue is now empty). Returns false on a miss.
    pub fn remove(&mut self, path: &str) -> bool {
        let Some(index) = position_of(&self.songs, path) else {
            return false;
        };
        self.songs.remove(index);

        if let Some(original) = self.original.as_mut() {
            original.retain(|s| s.path != path);
        }

        if self.current.as_deref() == Some(path) {
            self.current = self.songs.first().map(|s| s.path.clone());
        }
        true
    }

    /// Replace the contents wholesale, keeping the current shuffle state
    ///
    /// While shuffled the snapshot becomes `songs` and the live list a fresh
    /// permutation of it. Returns true if the current song was dropped.
    pub fn replace<R: Rng + ?Sized>(&mut self, songs: Vec<Song>, rng: &mut R) -> bool {
        let songs = dedup_by_path(songs);

        if self.original.is_some() {
            let mut live = songs.clone();
            shuffle_songs(&mut live, rng);
            self.original = Some(songs);
            self.songs = live;
        } else {
            self.songs = songs;
        }

        match self.current.as_deref() {
            Some(path) if !self.contains(path) => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Start over with `songs` in order, first song current, no snapshot
    pub fn reset(&mut self, songs: Vec<Song>) {
        self.songs = dedup_by_path(songs);
        self.original = None;
        self.current = self.songs.first().map(|s| s.path.clone());
    }

    /// Empty the queue and clear the current song
    ///
    /// An existing snapshot is emptied, not dropped, so shuffle stays on.
    pub fn clear(&mut self) {
        self.songs.clear();
        if let Some(original) = self.original.as_mut() {
            original.clear();
        }
        self.current = None;
    }

    /// Snapshot the live order, then permute it
    ///
    /// No-op if already shuffled.
    pub fn enter_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.original.is_some() {
            return;
        }
        self.original = Some(self.songs.clone());
        shuffle_songs(&mut self.songs, rng);
    }

    /// Restore the snapshot with the current song moved to the front
    ///
    /// Returns false if not shuffled.
    pub fn leave_shuffle(&mut self) -> bool {
        let Some(mut restored) = self.original.take() else {
            return false;
        };

        if let Some(index) = self
            .current
            .as_deref()
            .and_then(|path| position_of(&restored, path))
        {
            let song = restored.remove(index);
            restored.insert(0, song);
        }

        self.songs = restored;
        true
    }

    /// Substitute `replacement` for the song at `old_path` in both lists
    ///
    /// If the replacement path is still missing afterwards it is appended, and
    /// a current song at `old_path` follows the replacement.
    pub fn rewrite(&mut self, old_path: &str, replacement: &Song) {
        crate::reconcile::rewrite_songs(&mut self.songs, old_path, replacement);
        if !self.contains(&replacement.path) {
            self.songs.push(replacement.clone());
        }

        if let Some(original) = self.original.as_mut() {
            crate::reconcile::rewrite_songs(original, old_path, replacement);
            if !contains_path(original, &replacement.path) {
                original.push(replacement.clone());
            }
        }

        if self.current.as_deref() == Some(old_path) {
            self.current = Some(replacement.path.clone());
        }
    }
}

/// Insert after the song at `anchor`, or at the end when absent
fn insert_after(songs: &mut Vec<Song>, anchor: Option<&str>, song: Song) {
    match anchor.and_then(|path| position_of(songs, path)) {
        Some(index) => songs.insert(index + 1, song),
        None => songs.push(song),
    }
}
