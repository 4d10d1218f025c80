//! Shared fixtures for engine integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cadence_core::{
    CadenceError, Downloader, Playlist, RemoteResolver, Result, Scanner, SessionStore, Settings,
    Song,
};
use cadence_session::{SessionConfig, SessionEngine};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory store that counts writes per collection
#[derive(Default)]
pub struct MemoryStore {
    pub queue: Mutex<Vec<Song>>,
    pub library: Mutex<Vec<Song>>,
    pub playlists: Mutex<Vec<Playlist>>,
    pub settings: Mutex<Settings>,
    pub queue_writes: AtomicUsize,
    pub playlist_writes: AtomicUsize,
    pub library_writes: AtomicUsize,
    pub settings_writes: AtomicUsize,
    /// Stall the next playlist write this long before it lands
    pub playlist_write_delay: Mutex<Option<Duration>>,
    /// Make `load_playlists` fail while set
    pub fail_playlist_loads: AtomicBool,
}

impl MemoryStore {
    pub fn with_queue(songs: Vec<Song>) -> Self {
        Self {
            queue: Mutex::new(songs),
            ..Self::default()
        }
    }

    pub fn with_library(songs: Vec<Song>) -> Self {
        Self {
            library: Mutex::new(songs),
            ..Self::default()
        }
    }

    pub fn saved_queue(&self) -> Vec<Song> {
        self.queue.lock().unwrap().clone()
    }

    pub fn saved_library(&self) -> Vec<Song> {
        self.library.lock().unwrap().clone()
    }

    pub fn saved_playlists(&self) -> Vec<Playlist> {
        self.playlists.lock().unwrap().clone()
    }

    pub fn saved_settings(&self) -> Settings {
        self.settings.lock().unwrap().clone()
    }

    pub fn queue_writes(&self) -> usize {
        self.queue_writes.load(Ordering::SeqCst)
    }

    pub fn playlist_writes(&self) -> usize {
        self.playlist_writes.load(Ordering::SeqCst)
    }

    pub fn delay_next_playlist_write(&self, delay: Duration) {
        *self.playlist_write_delay.lock().unwrap() = Some(delay);
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load_play_queue(&self) -> Result<Vec<Song>> {
        Ok(self.saved_queue())
    }

    async fn save_play_queue(&self, songs: &[Song]) -> Result<()> {
        *self.queue.lock().unwrap() = songs.to_vec();
        self.queue_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_library(&self) -> Result<Vec<Song>> {
        Ok(self.saved_library())
    }

    async fn save_to_library(&self, songs: &[Song]) -> Result<()> {
        *self.library.lock().unwrap() = songs.to_vec();
        self.library_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_playlists(&self) -> Result<Vec<Playlist>> {
        if self.fail_playlist_loads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.saved_playlists())
    }

    async fn save_playlists(&self, playlists: &[Playlist]) -> Result<()> {
        let delay = self.playlist_write_delay.lock().unwrap().take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        *self.playlists.lock().unwrap() = playlists.to_vec();
        self.playlist_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_settings(&self) -> Result<Settings> {
        Ok(self.saved_settings())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        *self.settings.lock().unwrap() = settings.clone();
        self.settings_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Store whose every call fails
pub struct FailingStore;

fn unavailable() -> CadenceError {
    CadenceError::storage("disk unavailable")
}

#[async_trait]
impl SessionStore for FailingStore {
    async fn load_play_queue(&self) -> Result<Vec<Song>> {
        Err(unavailable())
    }

    async fn save_play_queue(&self, _songs: &[Song]) -> Result<()> {
        Err(unavailable())
    }

    async fn load_library(&self) -> Result<Vec<Song>> {
        Err(unavailable())
    }

    async fn save_to_library(&self, _songs: &[Song]) -> Result<()> {
        Err(unavailable())
    }

    async fn load_playlists(&self) -> Result<Vec<Playlist>> {
        Err(unavailable())
    }

    async fn save_playlists(&self, _playlists: &[Playlist]) -> Result<()> {
        Err(unavailable())
    }

    async fn load_settings(&self) -> Result<Settings> {
        Err(unavailable())
    }

    async fn save_settings(&self, _settings: &Settings) -> Result<()> {
        Err(unavailable())
    }
}

/// Scanner returning a fixed result
pub struct FixedScanner(pub Result<Vec<Song>>);

#[async_trait]
impl Scanner for FixedScanner {
    async fn scan_music(&self, _target_dir: &Path) -> Result<Vec<Song>> {
        match &self.0 {
            Ok(songs) => Ok(songs.clone()),
            Err(e) => Err(CadenceError::collaborator("scanner", e.to_string())),
        }
    }
}

/// Resolver that turns any URL into an online song, or fails
pub struct FakeResolver {
    pub fail: bool,
}

#[async_trait]
impl RemoteResolver for FakeResolver {
    async fn parse_remote_url(&self, url: &str) -> Result<Song> {
        if self.fail {
            return Err(CadenceError::collaborator("resolver", "unsupported url"));
        }
        Ok(Song::online(url, format!("Remote {url}"), "BV1test", 1))
    }
}

/// Downloader that "saves" into the folder under the song's name
pub struct FakeDownloader {
    pub fail: bool,
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn download_remote_audio(&self, song: &Song, download_folder: &Path) -> Result<PathBuf> {
        if self.fail {
            return Err(CadenceError::collaborator("downloader", "connection reset"));
        }
        Ok(download_folder.join(format!("{}.m4a", song.name)))
    }
}

pub fn song(id: &str) -> Song {
    Song::local(format!("/music/{id}.mp3"), format!("Track {id}"))
}

pub fn path(id: &str) -> String {
    format!("/music/{id}.mp3")
}

pub fn paths(songs: &[Song]) -> Vec<String> {
    songs.iter().map(|s| s.path.clone()).collect()
}

pub fn seeded_config() -> SessionConfig {
    SessionConfig {
        shuffle_seed: Some(1234),
        ..SessionConfig::default()
    }
}

pub async fn engine_with(store: MemoryStore) -> (SessionEngine<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let engine = SessionEngine::start(Arc::clone(&store), seeded_config()).await;
    (engine, store)
}

pub async fn empty_engine() -> (SessionEngine<MemoryStore>, Arc<MemoryStore>) {
    engine_with(MemoryStore::default()).await
}
