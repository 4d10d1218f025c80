//! External collaborator traits for Cadence
//!
//! The engine only sees these interfaces; scanning, remote resolution and
//! downloading are implemented elsewhere and assumed to return validated data.
use crate::error::Result;
use crate::types::Song;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Finds local audio files
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Scan `target_dir` recursively and return the songs found
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read
    async fn scan_music(&self, target_dir: &Path) -> Result<Vec<Song>>;
}

/// Turns a remote URL into an online song
#[async_trait]
pub trait RemoteResolver: Send + Sync {
    /// Resolve `url` into an online `Song`
    ///
    /// # Errors
    /// Returns an error if the URL is not recognised or the provider fails
    async fn parse_remote_url(&self, url: &str) -> Result<Song>;
}

/// Saves online songs as local files
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `song` into `download_folder`, returning the saved file path
    ///
    /// # Errors
    /// Returns an error if the transfer or the write fails
    async fn download_remote_audio(&self, song: &Song, download_folder: &Path) -> Result<PathBuf>;
}
