//! Row mapping shared by every table that stores song records

use crate::error::{Result, StorageError};
use cadence_core::Song;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Map a row carrying the song columns back to a `Song`
pub(crate) fn from_row(row: &SqliteRow, table: &'static str) -> Result<Song> {
    let page = row
        .try_get::<Option<i64>, _>("page")?
        .map(|p| {
            u32::try_from(p).map_err(|_| StorageError::corrupt(table, format!("page out of range: {p}")))
        })
        .transpose()?;

    Ok(Song {
        path: row.try_get("path")?,
        name: row.try_get("name")?,
        is_online: row.try_get("is_online")?,
        bv_id: row.try_get("bv_id")?,
        page,
        is_downloaded: row.try_get("is_downloaded")?,
    })
}

/// Load an ordered song table
pub(crate) async fn load_ordered(pool: &SqlitePool, table: &'static str) -> Result<Vec<Song>> {
    let sql = format!(
        "SELECT path, name, is_online, bv_id, page, is_downloaded FROM {table} ORDER BY position"
    );
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    rows.iter().map(|row| from_row(row, table)).collect()
}

/// Replace the full contents of an ordered song table
///
/// Runs in one transaction. Duplicate paths keep their first occurrence.
pub(crate) async fn replace_ordered(
    pool: &SqlitePool,
    table: &'static str,
    songs: &[Song],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let delete = format!("DELETE FROM {table}");
    sqlx::query(&delete).execute(&mut *tx).await?;

    let insert = format!(
        "INSERT OR IGNORE INTO {table} (position, path, name, is_online, bv_id, page, is_downloaded)
         VALUES (?, ?, ?, ?, ?, ?, ?)"
    );
    for (position, song) in songs.iter().enumerate() {
        sqlx::query(&insert)
            .bind(position as i64)
            .bind(&song.path)
            .bind(&song.name)
            .bind(song.is_online)
            .bind(song.bv_id.as_deref())
            .bind(song.page.map(i64::from))
            .bind(song.is_downloaded)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
