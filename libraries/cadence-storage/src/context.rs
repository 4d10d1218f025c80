use crate::{library, playlists, queue, settings};
use async_trait::async_trait;
use cadence_core::{error::Result, storage::SessionStore, Playlist, Settings, Song};
use sqlx::SqlitePool;

/// Session store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    // Play queue
    async fn load_play_queue(&self) -> Result<Vec<Song>> {
        Ok(queue::load(&self.pool).await?)
    }

    async fn save_play_queue(&self, songs: &[Song]) -> Result<()> {
        Ok(queue::save(&self.pool, songs).await?)
    }

    // Library
    async fn load_library(&self) -> Result<Vec<Song>> {
        Ok(library::load(&self.pool).await?)
    }

    async fn save_to_library(&self, songs: &[Song]) -> Result<()> {
        Ok(library::save(&self.pool, songs).await?)
    }

    // Playlists
    async fn load_playlists(&self) -> Result<Vec<Playlist>> {
        Ok(playlists::load_all(&self.pool).await?)
    }

    async fn save_playlists(&self, playlists: &[Playlist]) -> Result<()> {
        Ok(playlists::save_all(&self.pool, playlists).await?)
    }

    // Settings
    async fn load_settings(&self) -> Result<Settings> {
        Ok(settings::load(&self.pool).await?)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        Ok(settings::save(&self.pool, settings).await?)
    }
}
