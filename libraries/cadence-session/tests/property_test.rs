//! Property-based tests for the play queue
//!
//! Uses proptest to verify invariants across many random operation sequences.

use cadence_core::Song;
use cadence_session::mode::ModeController;
use cadence_session::shuffle::shuffle_rng;
use cadence_session::{PlayMode, PlayQueue};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn arbitrary_song() -> impl Strategy<Value = Song> {
    ("[a-e][0-9]", "[A-Za-z ]{1,12}")
        .prop_map(|(id, name)| Song::local(format!("/music/{id}.mp3"), name))
}

fn arbitrary_songs() -> impl Strategy<Value = Vec<Song>> {
    prop::collection::vec(arbitrary_song(), 0..30)
}

#[derive(Debug, Clone)]
enum Op {
    Insert(Song),
    Append(Vec<Song>),
    Remove(usize),
    Select(usize),
    ToggleShuffle,
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_song().prop_map(Op::Insert),
        prop::collection::vec(arbitrary_song(), 0..5).prop_map(Op::Append),
        (0usize..40).prop_map(Op::Remove),
        (0usize..40).prop_map(Op::Select),
        Just(Op::ToggleShuffle),
        Just(Op::Clear),
    ]
}

fn path_set(songs: &[Song]) -> HashSet<String> {
    songs.iter().map(|s| s.path.clone()).collect()
}

fn assert_consistent(queue: &PlayQueue) -> Result<(), TestCaseError> {
    let live = path_set(queue.songs());
    prop_assert_eq!(live.len(), queue.len(), "duplicate path in queue");

    if let Some(snapshot) = queue.snapshot() {
        prop_assert_eq!(path_set(snapshot), live.clone());
        prop_assert_eq!(snapshot.len(), queue.len());
    }

    if let Some(path) = queue.current_path() {
        prop_assert!(live.contains(path), "current song not queued");
    }
    Ok(())
}

// ===== Property Tests =====

proptest! {
    /// Property: any operation sequence keeps the queue consistent
    #[test]
    fn queue_invariants_hold(
        initial in arbitrary_songs(),
        ops in prop::collection::vec(arbitrary_op(), 1..40),
        seed in any::<u64>(),
    ) {
        let mut queue = PlayQueue::new(initial);
        let mut modes = ModeController::new(Some(seed));

        for op in ops {
            match op {
                Op::Insert(song) => { queue.insert_after_current(song); }
                Op::Append(songs) => { queue.append(&songs); }
                Op::Remove(i) => {
                    if let Some(path) = queue.songs().get(i).map(|s| s.path.clone()) {
                        queue.remove(&path);
                    }
                }
                Op::Select(i) => { queue.select_index(i); }
                Op::ToggleShuffle => { modes.toggle_shuffle(&mut queue); }
                Op::Clear => queue.clear(),
            }
            assert_consistent(&queue)?;
            prop_assert_eq!(queue.is_shuffled(), modes.mode() == PlayMode::Shuffle);
        }
    }

    /// Property: enter then leave shuffle keeps the multiset, current first
    #[test]
    fn shuffle_round_trip(songs in arbitrary_songs(), pick in 0usize..30, seed in any::<u64>()) {
        let mut queue = PlayQueue::new(songs);
        let before = path_set(queue.songs());
        let len = queue.len();
        queue.select_index(pick);
        let current = queue.current_path().map(str::to_string);

        queue.enter_shuffle(&mut shuffle_rng(Some(seed)));
        prop_assert_eq!(queue.current_path().map(str::to_string), current.clone());
        queue.leave_shuffle();

        prop_assert_eq!(path_set(queue.songs()), before);
        prop_assert_eq!(queue.len(), len);
        if let Some(current) = current {
            prop_assert_eq!(&queue.songs()[0].path, &current);
        }
    }

    /// Property: inserting a new song places it right after the current one
    #[test]
    fn insert_lands_after_current(songs in arbitrary_songs(), pick in 0usize..30, id in 0u32..1000) {
        let mut queue = PlayQueue::new(songs);
        queue.select_index(pick);
        let anchor = queue.current_index();
        let song = Song::local(format!("/fresh/{id}.mp3"), "fresh");

        prop_assert!(queue.insert_after_current(song.clone()));

        let at = queue.songs().iter().position(|s| s.path == song.path).unwrap();
        match anchor {
            Some(i) => prop_assert_eq!(at, i + 1),
            None => prop_assert_eq!(at, queue.len() - 1),
        }
        prop_assert_eq!(queue.songs().iter().filter(|s| s.path == song.path).count(), 1);
    }

    /// Property: removing twice is the same as removing once
    #[test]
    fn remove_is_idempotent(songs in arbitrary_songs(), pick in 0usize..30) {
        let mut queue = PlayQueue::new(songs);
        let Some(path) = queue.songs().get(pick).map(|s| s.path.clone()) else {
            return Ok(());
        };

        queue.remove(&path);
        let once = queue.songs().to_vec();
        let current_once = queue.current_path().map(str::to_string);

        prop_assert!(!queue.remove(&path));
        prop_assert_eq!(queue.songs(), &once[..]);
        prop_assert_eq!(queue.current_path().map(str::to_string), current_once);
    }

    /// Property: navigation indices always stay in bounds
    #[test]
    fn navigation_in_bounds(len in 1usize..50, current in 0usize..50, mode in 0u8..4) {
        let current = current % len;
        let mut queue = PlayQueue::new(Vec::new());
        let mut modes = ModeController::new(Some(0));
        let target = match mode {
            0 => PlayMode::Sequence,
            1 => PlayMode::Loop,
            2 => PlayMode::Single,
            _ => PlayMode::Shuffle,
        };
        modes.set_mode(&mut queue, target);

        if let Some(next) = modes.next_index(current, len) {
            prop_assert!(next < len);
        } else {
            prop_assert_eq!(target, PlayMode::Sequence);
            prop_assert_eq!(current, len - 1);
        }
        prop_assert!(modes.prev_index(current, len) < len);
    }
}
