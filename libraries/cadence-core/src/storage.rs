//! Storage trait for session state

use crate::error::Result;
use crate::types::{Playlist, Settings, Song};
use async_trait::async_trait;

/// Durable store for the session engine
///
/// Every `save_*` call receives the complete collection, never a delta, so
/// writes stay idempotent whatever order they complete in. Implementations
/// may be called concurrently from background tasks.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    // ========================================================================
    // Play queue
    // ========================================================================

    /// Load the persisted play queue
    async fn load_play_queue(&self) -> Result<Vec<Song>>;

    /// Replace the persisted play queue
    async fn save_play_queue(&self, songs: &[Song]) -> Result<()>;

    // ========================================================================
    // Library
    // ========================================================================

    /// Load the local library
    async fn load_library(&self) -> Result<Vec<Song>>;

    /// Replace the persisted library
    async fn save_to_library(&self, songs: &[Song]) -> Result<()>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Load every playlist, in collection order
    async fn load_playlists(&self) -> Result<Vec<Playlist>>;

    /// Replace the whole playlist collection
    async fn save_playlists(&self, playlists: &[Playlist]) -> Result<()>;

    // ========================================================================
    // Settings
    // ========================================================================

    /// Load settings (defaults when never saved)
    async fn load_settings(&self) -> Result<Settings>;

    /// Replace settings
    async fn save_settings(&self, settings: &Settings) -> Result<()>;
}
