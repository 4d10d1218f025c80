//! Playlist collection storage
//!
//! The collection is always written as a whole: one transaction clears both
//! tables and re-inserts every playlist with its songs.

use crate::error::Result;
use crate::song_rows;
use cadence_core::{Playlist, PlaylistId, PlaylistKind, Song};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

/// Load all playlists in collection order
pub async fn load_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let playlist_rows = sqlx::query(
        r#"
        SELECT id, name, kind
        FROM playlists
        ORDER BY position
        "#,
    )
    .fetch_all(pool)
    .await?;

    let song_rows = sqlx::query(
        r#"
        SELECT playlist_id, path, name, is_online, bv_id, page, is_downloaded
        FROM playlist_songs
        ORDER BY playlist_id, position
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut songs_by_playlist: HashMap<String, Vec<Song>> = HashMap::new();
    for row in &song_rows {
        let playlist_id: String = row.try_get("playlist_id")?;
        let song = song_rows::from_row(row, "playlist_songs")?;
        songs_by_playlist.entry(playlist_id).or_default().push(song);
    }

    let mut playlists = Vec::with_capacity(playlist_rows.len());
    for row in playlist_rows {
        let id: String = row.try_get("id")?;
        let kind_str: String = row.try_get("kind")?;
        let kind = PlaylistKind::parse(&kind_str).unwrap_or_else(|| {
            tracing::warn!("Unknown playlist kind '{}' for {}, treating as user", kind_str, id);
            PlaylistKind::User
        });

        playlists.push(Playlist {
            songs: songs_by_playlist.remove(&id).unwrap_or_default(),
            id: PlaylistId::new(id),
            name: row.try_get("name")?,
            kind,
        });
    }

    Ok(playlists)
}

/// Replace the stored playlist collection
pub async fn save_all(pool: &SqlitePool, playlists: &[Playlist]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM playlist_songs")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM playlists").execute(&mut *tx).await?;

    for (position, playlist) in playlists.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO playlists (id, name, kind, position)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(playlist.id.as_str())
        .bind(&playlist.name)
        .bind(playlist.kind.as_str())
        .bind(position as i64)
        .execute(&mut *tx)
        .await?;

        for (song_position, song) in playlist.songs.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO playlist_songs
                    (playlist_id, position, path, name, is_online, bv_id, page, is_downloaded)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(playlist.id.as_str())
            .bind(song_position as i64)
            .bind(&song.path)
            .bind(&song.name)
            .bind(song.is_online)
            .bind(song.bv_id.as_deref())
            .bind(song.page.map(i64::from))
            .bind(song.is_downloaded)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    tracing::debug!("Saved {} playlists", playlists.len());
    Ok(())
}
