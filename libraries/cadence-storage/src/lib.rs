//! Cadence Storage
//!
//! `SQLite` persistence layer for the Cadence session engine.
//!
//! # Architecture
//!
//! - **Full snapshots**: every save replaces a whole collection in one
//!   transaction, so out-of-order writes never leave partial state behind
//! - **Vertical slicing**: each persisted collection owns its own queries
//!   (`queue`, `library`, `playlists`, `settings`)
//! - **Embedded migrations**: the schema ships inside the binary
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_storage::{create_pool, run_migrations, SqliteSessionStore};
//! use cadence_core::SessionStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://cadence.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteSessionStore::new(pool);
//! let queue = store.load_play_queue().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod song_rows;

// Vertical slices
pub mod library;
pub mod playlists;
pub mod queue;
pub mod settings;

pub use context::SqliteSessionStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before the store is handed to the engine.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://cadence.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal) // concurrent background writers
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::info!("Database pool ready");

    Ok(pool)
}

/// Open (creating if needed) the database file at `path` and migrate it
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the connection
/// fails, or migrations fail
pub async fn open(path: &std::path::Path) -> Result<SqliteSessionStore, StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let path_str = path
        .to_str()
        .ok_or_else(|| StorageError::Connection("Database path contains invalid UTF-8".into()))?;

    // Windows paths need forward slashes inside the URL
    let url = if cfg!(windows) {
        format!("sqlite:///{}", path_str.replace('\\', "/"))
    } else {
        format!("sqlite://{}", path_str)
    };

    let pool = create_pool(&url).await?;
    run_migrations(&pool).await?;

    Ok(SqliteSessionStore::new(pool))
}
