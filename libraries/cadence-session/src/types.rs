//! Core types for session management

use serde::{Deserialize, Serialize};

/// Playback ordering mode
///
/// Shuffle is a mode of its own rather than a flag next to repeat, so the
/// four modes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    /// Play through the queue once, stop at the end
    #[default]
    Sequence,

    /// Wrap around at both ends
    Loop,

    /// Repeat the current song
    Single,

    /// Randomized order, wraps at both ends
    Shuffle,
}

impl PlayMode {
    /// Successor in the repeat cycle `Sequence -> Loop -> Single -> Sequence`
    ///
    /// Shuffle counts as `Sequence` here, so leaving it lands on `Loop`.
    pub fn next_repeat(self) -> Self {
        match self {
            PlayMode::Sequence | PlayMode::Shuffle => PlayMode::Loop,
            PlayMode::Loop => PlayMode::Single,
            PlayMode::Single => PlayMode::Sequence,
        }
    }
}

/// Configuration for the session engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a toast stays visible (default: 3000 ms)
    pub toast_duration_ms: u64,

    /// Volume used until one has been saved (0-100, default: 100)
    pub default_volume: u8,

    /// Fixed seed for shuffle permutations (default: entropy)
    pub shuffle_seed: Option<u64>,

    /// Display name of the local-library playlist
    pub local_library_name: String,

    /// Display name of the favorites playlist
    pub favorites_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
            default_volume: 100,
            shuffle_seed: None,
            local_library_name: "Local Music".to_string(),
            favorites_name: "Favorites".to_string(),
        }
    }
}
