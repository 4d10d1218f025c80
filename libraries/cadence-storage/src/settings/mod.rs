//! Application settings
//!
//! Settings are stored as key-value pairs with JSON-serialized values, and
//! assembled into the single `Settings` record the engine works with.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_storage::settings;
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! settings::set_setting(pool, settings::SETTING_VOLUME, &serde_json::json!(70)).await?;
//!
//! let volume = settings::get_setting(pool, settings::SETTING_VOLUME).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, StorageError};
use cadence_core::Settings;
use sqlx::{Row, SqlitePool};
use std::path::PathBuf;

// Setting key constants
/// Download folder for online tracks (string or null)
pub const SETTING_DOWNLOAD_FOLDER: &str = "library.download_folder";

/// Audio volume setting (0-100)
pub const SETTING_VOLUME: &str = "audio.volume";

/// Get a single setting value
///
/// Returns `Ok(None)` if the key was never written.
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<serde_json::Value>> {
    let row = sqlx::query("SELECT value FROM app_settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let raw: String = row.try_get("value")?;
            Ok(Some(serde_json::from_str(&raw)?))
        }
        None => Ok(None),
    }
}

/// Set a single setting value
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &serde_json::Value) -> Result<()> {
    let value_str = serde_json::to_string(value)?;
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO app_settings (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value_str)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load the settings record, falling back to defaults for missing keys
pub async fn load(pool: &SqlitePool) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(value) = get_setting(pool, SETTING_DOWNLOAD_FOLDER).await? {
        settings.download_folder = serde_json::from_value::<Option<PathBuf>>(value)?;
    }

    if let Some(value) = get_setting(pool, SETTING_VOLUME).await?.filter(|v| !v.is_null()) {
        let volume = value
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| StorageError::corrupt("app_settings", format!("bad volume: {value}")))?;
        settings.volume = Some(volume.min(cadence_core::MAX_VOLUME));
    }

    Ok(settings)
}

/// Store the full settings record
pub async fn save(pool: &SqlitePool, settings: &Settings) -> Result<()> {
    let mut tx = pool.begin().await?;
    let now = chrono::Utc::now().timestamp();

    let entries = [
        (
            SETTING_DOWNLOAD_FOLDER,
            serde_json::to_string(&settings.download_folder)?,
        ),
        (SETTING_VOLUME, serde_json::to_string(&settings.volume)?),
    ];

    for (key, value) in entries {
        sqlx::query(
            "INSERT INTO app_settings (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
