//! Session Events
//!
//! The engine queues an event for every observable state change; the UI
//! drains them after each call and re-renders what changed.

use crate::notify::ToastKind;
use crate::types::PlayMode;
use serde::{Deserialize, Serialize};

/// Events emitted by the session engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Queue contents or order changed
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Current song changed
    CurrentSongChanged {
        /// Path of the new current song, if any
        path: Option<String>,
    },

    /// Playing flag flipped
    PlayingChanged {
        /// Whether playback is running
        is_playing: bool,
    },

    /// Play mode switched
    ModeChanged {
        /// The new mode
        mode: PlayMode,
    },

    /// Playlist collection changed
    PlaylistsChanged {
        /// Number of playlists
        count: usize,
    },

    /// Library contents changed
    LibraryChanged {
        /// New library size
        length: usize,
    },

    /// Settings record changed
    SettingsChanged,

    /// Volume or mute changed
    VolumeChanged {
        /// Level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Toast shown or hidden
    ToastChanged {
        /// Kind of the new toast, `None` when hidden
        kind: Option<ToastKind>,
    },
}
