//! Persisted local library

use crate::error::Result;
use crate::song_rows;
use cadence_core::Song;
use sqlx::SqlitePool;

const TABLE: &str = "library_songs";

/// Load every known local song
pub async fn load(pool: &SqlitePool) -> Result<Vec<Song>> {
    song_rows::load_ordered(pool, TABLE).await
}

/// Replace the stored library
pub async fn save(pool: &SqlitePool, songs: &[Song]) -> Result<()> {
    song_rows::replace_ordered(pool, TABLE, songs).await?;
    tracing::debug!("Saved library ({} songs)", songs.len());
    Ok(())
}
