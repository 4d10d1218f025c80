//! Persisted play queue

use crate::error::Result;
use crate::song_rows;
use cadence_core::Song;
use sqlx::SqlitePool;

const TABLE: &str = "play_queue";

/// Load the play queue in playback order
pub async fn load(pool: &SqlitePool) -> Result<Vec<Song>> {
    song_rows::load_ordered(pool, TABLE).await
}

/// Replace the stored play queue
pub async fn save(pool: &SqlitePool, songs: &[Song]) -> Result<()> {
    song_rows::replace_ordered(pool, TABLE, songs).await?;
    tracing::debug!("Saved play queue ({} songs)", songs.len());
    Ok(())
}
