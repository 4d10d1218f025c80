//! Directory scanner for local audio files

use async_trait::async_trait;
use cadence_core::{CadenceError, Result, Scanner, Song};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported audio file extensions
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "aac", "m4a", "opus"];

/// Walks a directory tree and reports every audio file as a local song
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner {
    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse (unlimited when `None`)
    max_depth: Option<usize>,
}

impl DirectoryScanner {
    /// Create a new directory scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn scan_blocking(&self, root: &Path) -> Result<Vec<Song>> {
        if !root.is_dir() {
            return Err(CadenceError::invalid_input(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let mut walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut songs = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() && is_audio_file(path) {
                songs.push(song_from_path(path));
            }
        }

        Ok(songs)
    }
}

#[async_trait]
impl Scanner for DirectoryScanner {
    async fn scan_music(&self, target_dir: &Path) -> Result<Vec<Song>> {
        let scanner = self.clone();
        let root: PathBuf = target_dir.to_path_buf();

        tokio::task::spawn_blocking(move || scanner.scan_blocking(&root))
            .await
            .map_err(|e| CadenceError::collaborator("scanner", e.to_string()))?
    }
}

/// Check if a file is a supported audio file
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Local song record for `path`, named after the file stem
pub fn song_from_path(path: &Path) -> Song {
    let name = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
    Song::local(path.to_string_lossy(), name)
}
