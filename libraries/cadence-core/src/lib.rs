//! Cadence Core
//!
//! Core data model, traits, and error handling for the Cadence session engine.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `PlaylistId`, `PlaylistKind`, `Settings`
//! - **Storage Trait**: `SessionStore`, the durable store behind the engine
//! - **Collaborator Traits**: `Scanner`, `RemoteResolver`, `Downloader`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Playlist, PlaylistKind, Song};
//!
//! let song = Song::local("/music/song.mp3", "My Favorite Song");
//!
//! let mut favorites = Playlist::system(PlaylistKind::Favorites, "Favorites").unwrap();
//! favorites.songs.push(song);
//! assert!(favorites.contains("/music/song.mp3"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use storage::SessionStore;
pub use traits::{Downloader, RemoteResolver, Scanner};

pub use types::{
    contains_path, dedup_by_path, merge_unique, position_of, Playlist, PlaylistId, PlaylistKind,
    Settings, Song, MAX_VOLUME,
};
