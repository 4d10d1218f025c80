//! Online-to-local rewriting
//!
//! After a remote track finishes downloading, every reference to its old
//! path is swapped for the downloaded record. The engine drives the full
//! pass (reload, playlists, queue, library); the list surgery lives here.

use cadence_core::{position_of, Song};

/// Substitute `replacement` for the entry at `old_path`
///
/// The entry keeps its position. If `replacement.path` is already in the
/// list, that entry takes the new record and the old one is dropped.
/// Returns false when `old_path` is absent.
pub fn rewrite_songs(songs: &mut Vec<Song>, old_path: &str, replacement: &Song) -> bool {
    let Some(old_index) = position_of(songs, old_path) else {
        return false;
    };

    if old_path != replacement.path {
        if let Some(existing) = position_of(songs, &replacement.path) {
            songs[existing] = replacement.clone();
            songs.remove(old_index);
            return true;
        }
    }

    songs[old_index] = replacement.clone();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn online() -> Song {
        Song::online("http://x", "X", "BV1x", 1)
    }

    fn local() -> Song {
        Song::downloaded("/local/x.mp3", "Song X")
    }

    #[test]
    fn replaces_in_place() {
        let a = Song::local("/a.mp3", "A");
        let mut songs = vec![a.clone(), online(), Song::local("/c.mp3", "C")];

        assert!(rewrite_songs(&mut songs, "http://x", &local()));

        assert_eq!(songs[0], a);
        assert_eq!(songs[1], local());
        assert!(!songs[1].is_online);
        assert!(songs[1].is_downloaded);
        assert_eq!(songs[1].bv_id, None);
    }

    #[test]
    fn dedups_when_target_already_present() {
        let mut songs = vec![Song::local("/local/x.mp3", "old name"), online()];

        assert!(rewrite_songs(&mut songs, "http://x", &local()));

        assert_eq!(songs, vec![local()]);
    }

    #[test]
    fn miss_leaves_list_alone() {
        let mut songs = vec![Song::local("/a.mp3", "A")];
        let before = songs.clone();

        assert!(!rewrite_songs(&mut songs, "http://x", &local()));
        assert_eq!(songs, before);
    }

    #[test]
    fn same_path_refreshes_record() {
        let mut songs = vec![Song::local("/local/x.mp3", "X")];

        assert!(rewrite_songs(&mut songs, "/local/x.mp3", &local()));
        assert_eq!(songs, vec![local()]);
    }
}
