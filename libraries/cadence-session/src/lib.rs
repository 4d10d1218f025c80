//! Cadence Session
//!
//! Session-state engine for the Cadence audio player.
//!
//! This crate provides:
//! - Play queue with insert-after-current and dedup by path
//! - Play modes (Sequence, Loop, Single, Shuffle) with restorable shuffle
//! - Playlist collection with local-library and favorites system playlists
//! - Online-to-local reconciliation after downloads
//! - Toast notifications with automatic expiry
//! - Fire-and-forget persistence of full snapshots
//!
//! # Architecture
//!
//! `cadence-session` knows nothing about audio output, UI or SQL:
//! - The store is any `cadence_core::SessionStore`
//! - Scanning, URL resolution and downloading come in as collaborator traits
//! - The UI polls state and drains `SessionEvent`s
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_core::{SessionStore, Song};
//! use cadence_session::{PlayMode, SessionConfig, SessionEngine};
//! use std::sync::Arc;
//!
//! async fn run<S: SessionStore>(store: Arc<S>) {
//!     let mut engine = SessionEngine::start(store, SessionConfig::default()).await;
//!
//!     engine.play_song(Song::local("/music/a.mp3", "Song A"));
//!     engine.add_to_next(Song::local("/music/b.mp3", "Song B"));
//!     engine.set_play_mode(PlayMode::Loop);
//!     engine.play_next();
//!
//!     for event in engine.drain_events() {
//!         println!("{event:?}");
//!     }
//!
//!     // Wait for background writes before exiting
//!     engine.shutdown().await;
//! }
//! ```

mod engine;
mod error;
mod events;
pub mod mode;
mod notify;
mod persist;
pub mod playlists;
pub mod queue;
mod reconcile;
pub mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use engine::SessionEngine;
pub use error::{Result, SessionError};
pub use events::SessionEvent;
pub use notify::{Toast, ToastKind};
pub use persist::{PersistFailure, PersistTarget};
pub use queue::PlayQueue;
pub use reconcile::rewrite_songs;
pub use types::{PlayMode, SessionConfig};
pub use volume::Volume;
