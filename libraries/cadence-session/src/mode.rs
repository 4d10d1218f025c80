//! Play mode transitions and navigation

use crate::queue::PlayQueue;
use crate::shuffle::shuffle_rng;
use crate::types::PlayMode;
use rand::rngs::StdRng;

/// Outcome of a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Requested mode was already active
    Unchanged,

    /// Mode switched; live order permuted (entering shuffle) or untouched
    Switched,

    /// Left shuffle; the restored order must be persisted
    Restored,
}

/// Owns the play mode and the shuffle generator
#[derive(Debug)]
pub struct ModeController {
    mode: PlayMode,
    rng: StdRng,
}

impl ModeController {
    /// Start in `Sequence`
    pub fn new(shuffle_seed: Option<u64>) -> Self {
        Self {
            mode: PlayMode::Sequence,
            rng: shuffle_rng(shuffle_seed),
        }
    }

    /// Active mode
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Generator for permutations that happen outside mode changes
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Switch to `target`, reordering `queue` when shuffle is entered or left
    pub fn set_mode(&mut self, queue: &mut PlayQueue, target: PlayMode) -> ModeTransition {
        if target == self.mode {
            return ModeTransition::Unchanged;
        }

        let restored = self.mode == PlayMode::Shuffle && queue.leave_shuffle();
        if target == PlayMode::Shuffle {
            queue.enter_shuffle(&mut self.rng);
        }

        tracing::debug!("Play mode {:?} -> {:?}", self.mode, target);
        self.mode = target;

        if restored {
            ModeTransition::Restored
        } else {
            ModeTransition::Switched
        }
    }

    /// Enter shuffle, or leave it to `Sequence`
    pub fn toggle_shuffle(&mut self, queue: &mut PlayQueue) -> ModeTransition {
        let target = if self.mode == PlayMode::Shuffle {
            PlayMode::Sequence
        } else {
            PlayMode::Shuffle
        };
        self.set_mode(queue, target)
    }

    /// Step through the repeat cycle
    pub fn toggle_repeat(&mut self, queue: &mut PlayQueue) -> ModeTransition {
        let target = self.mode.next_repeat();
        self.set_mode(queue, target)
    }

    /// Back to `Sequence` after the queue was reset wholesale
    ///
    /// The caller has already dropped the snapshot. Returns whether the mode
    /// changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.mode != PlayMode::Sequence;
        self.mode = PlayMode::Sequence;
        changed
    }

    /// Index to play after `current` in a queue of `len` songs
    ///
    /// `None` once a `Sequence` run has reached its last song.
    pub fn next_index(&self, current: usize, len: usize) -> Option<usize> {
        match self.mode {
            PlayMode::Single => Some(current),
            PlayMode::Sequence => Some(current + 1).filter(|&next| next < len),
            PlayMode::Loop | PlayMode::Shuffle => Some((current + 1) % len.max(1)),
        }
    }

    /// Index to play before `current` in a queue of `len` songs
    ///
    /// Every mode but `Single` wraps backward.
    pub fn prev_index(&self, current: usize, len: usize) -> usize {
        match self.mode {
            PlayMode::Single => current,
            _ => (current + len.max(1) - 1) % len.max(1),
        }
    }
}
