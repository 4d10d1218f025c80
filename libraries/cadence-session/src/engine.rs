//! Session engine
//!
//! Single owner of all session state. Every mutator updates memory
//! synchronously, queues events and hands a snapshot to the persister.

use crate::error::{Result, SessionError};
use crate::events::SessionEvent;
use crate::mode::{ModeController, ModeTransition};
use crate::notify::{Notifier, Toast, ToastKind};
use crate::persist::{PersistFailure, Persister};
use crate::playlists::PlaylistCollection;
use crate::queue::PlayQueue;
use crate::types::{PlayMode, SessionConfig};
use crate::volume::Volume;
use cadence_core::{
    dedup_by_path, merge_unique, Downloader, Playlist, PlaylistId, PlaylistKind, RemoteResolver,
    Scanner, SessionStore, Settings, Song,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Session-state engine
///
/// Mutated through `&mut self` from one task; persistence runs in the
/// background. Must be driven from within a tokio runtime.
pub struct SessionEngine<S: SessionStore> {
    config: SessionConfig,

    queue: PlayQueue,
    mode: ModeController,
    is_playing: bool,

    playlists: PlaylistCollection,
    library: Vec<Song>,
    settings: Settings,
    volume: Volume,

    notifier: Notifier,
    persister: Persister<S>,
    failures: mpsc::UnboundedReceiver<PersistFailure>,

    pending_events: Vec<SessionEvent>,
}

impl<S: SessionStore> SessionEngine<S> {
    /// Load the persisted session and create missing system playlists
    ///
    /// Each collection is loaded once. A failed load is logged and leaves
    /// that collection empty (settings: defaults). Without a saved volume
    /// the configured default applies.
    pub async fn start(store: Arc<S>, config: SessionConfig) -> Self {
        let queue = store.load_play_queue().await.unwrap_or_else(|e| {
            tracing::error!("Failed to load play queue: {}", e);
            Vec::new()
        });
        let library = store.load_library().await.unwrap_or_else(|e| {
            tracing::error!("Failed to load library: {}", e);
            Vec::new()
        });
        let playlists = store.load_playlists().await.unwrap_or_else(|e| {
            tracing::error!("Failed to load playlists: {}", e);
            Vec::new()
        });
        let settings = store.load_settings().await.unwrap_or_else(|e| {
            tracing::error!("Failed to load settings: {}", e);
            Settings::default()
        });

        let (persister, failures) = Persister::new(store);

        let mut engine = Self {
            queue: PlayQueue::new(queue),
            mode: ModeController::new(config.shuffle_seed),
            is_playing: false,
            playlists: PlaylistCollection::new(playlists),
            library: dedup_by_path(library),
            volume: Volume::new(settings.volume.unwrap_or(config.default_volume)),
            settings,
            notifier: Notifier::new(Duration::from_millis(config.toast_duration_ms)),
            persister,
            failures,
            pending_events: Vec::new(),
            config,
        };

        let mut created = engine
            .playlists
            .ensure_system(PlaylistKind::LocalLibrary, &engine.config.local_library_name);
        created |= engine
            .playlists
            .ensure_system(PlaylistKind::Favorites, &engine.config.favorites_name);
        if created {
            engine.persist_playlists();
        }

        tracing::info!(
            "Session started: {} queued, {} in library, {} playlists",
            engine.queue.len(),
            engine.library.len(),
            engine.playlists.len()
        );

        engine
    }

    /// Wait for outstanding writes, then drop the engine
    pub async fn shutdown(mut self) {
        self.flush().await;
        tracing::info!("Session shut down");
    }

    /// Wait for outstanding writes
    pub async fn flush(&mut self) {
        self.persister.flush().await;
    }

    // ===== Queue =====

    /// Play `song`, queueing it after the current song if needed
    pub fn play_song(&mut self, song: Song) {
        let path = song.path.clone();
        if self.queue.insert_after_current(song) {
            self.queue_changed();
        }
        self.select(&path);
        self.set_playing(true);
    }

    /// Replace the queue with `songs` and start from the first one
    ///
    /// Resets the mode to `Sequence`. Empty input does nothing.
    pub fn play_playlist(&mut self, songs: Vec<Song>) {
        if songs.is_empty() {
            return;
        }

        self.queue.reset(songs);
        if self.mode.reset() {
            self.emit(SessionEvent::ModeChanged {
                mode: PlayMode::Sequence,
            });
        }
        self.queue_changed();
        self.emit_current();
        self.set_playing(true);
    }

    /// Queue `song` right after the current one unless already queued
    pub fn add_to_next(&mut self, song: Song) {
        if self.queue.insert_after_current(song) {
            self.queue_changed();
        }
    }

    /// Merge `songs` into the queue; new paths go to the end
    pub fn add_music(&mut self, songs: &[Song]) {
        if self.queue.append(songs) {
            self.queue_changed();
        }
    }

    /// Remove the song at `path` from the queue
    pub fn remove_from_queue(&mut self, path: &str) {
        let was_current = self.queue.current_path() == Some(path);
        if !self.queue.remove(path) {
            return;
        }

        self.queue_changed();
        if was_current {
            self.emit_current();
        }
        if self.queue.is_empty() {
            self.set_playing(false);
        }
    }

    /// Advance per the play mode
    ///
    /// Past the last song in `Sequence` nothing changes, playing flag included.
    pub fn play_next(&mut self) {
        let Some(index) = self.queue.current_index() else {
            return;
        };
        if let Some(next) = self.mode.next_index(index, self.queue.len()) {
            self.move_to(next);
        }
    }

    /// Step back per the play mode
    pub fn play_prev(&mut self) {
        if let Some(index) = self.queue.current_index() {
            let prev = self.mode.prev_index(index, self.queue.len());
            self.move_to(prev);
        }
    }

    /// Refill the queue with the whole library
    pub fn reset_queue(&mut self) {
        self.replace_queue(self.library.clone());
        self.persist_queue();
    }

    /// Empty the queue and stop
    pub fn clear_queue(&mut self) {
        let had_current = self.queue.current_path().is_some();
        self.queue.clear();
        self.queue_changed();
        if had_current {
            self.emit_current();
        }
        self.set_playing(false);
    }

    /// Show `songs` as the queue without persisting it
    ///
    /// Used for filtered views; `reset_queue` leaves them.
    pub fn set_queue(&mut self, songs: Vec<Song>) {
        self.replace_queue(songs);
    }

    /// Flip the playing flag
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Set the playing flag
    pub fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit(SessionEvent::PlayingChanged {
                is_playing: playing,
            });
        }
    }

    // ===== Modes =====

    /// Switch to `mode`
    pub fn set_play_mode(&mut self, mode: PlayMode) {
        let transition = self.mode.set_mode(&mut self.queue, mode);
        self.apply_transition(transition);
    }

    /// Enter shuffle, or leave it to `Sequence`
    pub fn toggle_shuffle(&mut self) {
        let transition = self.mode.toggle_shuffle(&mut self.queue);
        self.apply_transition(transition);
    }

    /// Cycle `Sequence -> Loop -> Single`; from shuffle, land on `Loop`
    pub fn toggle_repeat(&mut self) {
        let transition = self.mode.toggle_repeat(&mut self.queue);
        self.apply_transition(transition);
    }

    // ===== Playlists =====

    /// Create a user playlist
    pub fn create_playlist(&mut self, name: impl Into<String>) -> PlaylistId {
        let id = self.playlists.create(name);
        self.playlists_changed();
        id
    }

    /// Create the system playlist of `kind` unless it exists
    pub fn create_system_playlist(&mut self, kind: PlaylistKind, name: impl Into<String>) {
        if self.playlists.ensure_system(kind, name) {
            self.playlists_changed();
        }
    }

    /// Delete a playlist
    pub fn delete_playlist(&mut self, id: &PlaylistId) {
        if self.playlists.delete(id).is_some() {
            self.playlists_changed();
        }
    }

    /// Append `song` to one playlist unless already there
    pub fn add_song_to_playlist(&mut self, id: &PlaylistId, song: Song) {
        if self.playlists.add_song(id, song) {
            self.playlists_changed();
        }
    }

    /// Remove the song at `path` from one playlist
    pub fn remove_song_from_playlist(&mut self, id: &PlaylistId, path: &str) {
        if self.playlists.remove_song(id, path) {
            self.playlists_changed();
        }
    }

    /// Replace one playlist's songs
    pub fn update_playlist_songs(&mut self, id: &PlaylistId, songs: Vec<Song>) {
        if self.playlists.update_songs(id, songs) {
            self.playlists_changed();
        }
    }

    /// Rename a playlist
    pub fn rename_playlist(&mut self, id: &PlaylistId, name: impl Into<String>) {
        if self.playlists.rename(id, name) {
            self.playlists_changed();
        }
    }

    /// Whether `path` is in favorites
    pub fn is_favorite(&self, path: &str) -> bool {
        self.playlists.is_favorite(path)
    }

    /// Add or remove `song` from favorites; returns the new state
    pub fn toggle_favorite(&mut self, song: Song) -> bool {
        let favorite = self
            .playlists
            .toggle_favorite(song, &self.config.favorites_name);
        self.playlists_changed();
        favorite
    }

    // ===== Reconciler =====

    /// Swap every reference to `old_path` for the downloaded local record
    ///
    /// Reloads playlists from the store first so edits made elsewhere are
    /// not overwritten.
    pub async fn convert_online_to_local(
        &mut self,
        old_path: &str,
        new_path: &str,
        display_name: &str,
    ) {
        self.persister.flush().await;
        match self.persister.store().load_playlists().await {
            Ok(playlists) => self.playlists.replace_all(playlists),
            Err(e) => tracing::error!("Failed to reload playlists, using memory: {}", e),
        }

        let record = Song::downloaded(new_path, display_name);
        tracing::debug!("Reconciling {} -> {}", old_path, new_path);

        self.playlists
            .ensure_system(PlaylistKind::LocalLibrary, &self.config.local_library_name);
        self.playlists.rewrite_song(old_path, &record);
        self.playlists_changed();

        let was_current = self.queue.current_path() == Some(old_path);
        self.queue.rewrite(old_path, &record);
        self.queue_changed();
        if was_current {
            self.emit_current();
        }

        self.merge_library(&[record]);
    }

    // ===== Library & collaborators =====

    /// Replace the in-memory library (not persisted)
    pub fn set_library(&mut self, songs: Vec<Song>) {
        self.library = dedup_by_path(songs);
        self.emit(SessionEvent::LibraryChanged {
            length: self.library.len(),
        });
    }

    /// Scan `dir` and merge the results into library and local playlist
    ///
    /// Returns the number of songs the scanner found.
    pub async fn scan_music(&mut self, scanner: &dyn Scanner, dir: &Path) -> Result<usize> {
        let songs = match scanner.scan_music(dir).await {
            Ok(songs) => songs,
            Err(e) => return Err(self.fail("Scan failed", e.into())),
        };

        tracing::info!("Scanned {} songs in {}", songs.len(), dir.display());
        self.merge_library(&songs);
        if self.playlists.merge_into_local_library(&songs) {
            self.playlists_changed();
        }
        Ok(songs.len())
    }

    /// Resolve a remote URL and play the result
    pub async fn add_online(&mut self, resolver: &dyn RemoteResolver, url: &str) -> Result<Song> {
        match resolver.parse_remote_url(url).await {
            Ok(song) => {
                self.play_song(song.clone());
                Ok(song)
            }
            Err(e) => Err(self.fail("Could not add online track", e.into())),
        }
    }

    /// Download an online song and switch every reference to the local copy
    pub async fn download_song(
        &mut self,
        downloader: &dyn Downloader,
        song: &Song,
    ) -> Result<PathBuf> {
        if !song.is_online {
            return Err(self.fail("Download failed", SessionError::NotOnline(song.path.clone())));
        }
        let Some(folder) = self.settings.download_folder.clone() else {
            return Err(self.fail("Download failed", SessionError::NoDownloadFolder));
        };

        let path = match downloader.download_remote_audio(song, &folder).await {
            Ok(path) => path,
            Err(e) => return Err(self.fail("Download failed", e.into())),
        };

        self.convert_online_to_local(&song.path, &path.to_string_lossy(), &song.name)
            .await;
        self.show_toast(format!("Downloaded {}", song.name), ToastKind::Success);
        Ok(path)
    }

    /// Set or clear the download folder
    pub fn set_download_folder(&mut self, folder: Option<PathBuf>) {
        self.settings.download_folder = folder;
        self.settings_changed();
    }

    // ===== Volume =====

    /// Set volume (clamped to 100) and persist it
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.settings.volume = Some(self.volume.level());
        self.volume_changed();
        self.settings_changed();
    }

    /// Flip mute (not persisted)
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.volume_changed();
    }

    /// Linear gain for the audio transport
    pub fn gain(&self) -> f32 {
        self.volume.gain()
    }

    // ===== Toasts =====

    /// Show a toast, replacing any current one
    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.notifier.show(message, kind);
        self.emit(SessionEvent::ToastChanged { kind: Some(kind) });
    }

    /// Hide the toast now
    pub fn hide_toast(&mut self) {
        if self.notifier.hide() {
            self.emit(SessionEvent::ToastChanged { kind: None });
        }
    }

    /// The live toast, if any
    pub fn toast(&self) -> Option<&Toast> {
        self.notifier.current()
    }

    // ===== State access =====

    /// Songs in playback order
    pub fn queue(&self) -> &[Song] {
        self.queue.songs()
    }

    /// Pre-shuffle order while shuffled
    pub fn shuffle_snapshot(&self) -> Option<&[Song]> {
        self.queue.snapshot()
    }

    /// The current song
    pub fn current_song(&self) -> Option<&Song> {
        self.queue.current()
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Active play mode
    pub fn play_mode(&self) -> PlayMode {
        self.mode.mode()
    }

    /// All playlists
    pub fn playlists(&self) -> &[Playlist] {
        self.playlists.all()
    }

    /// Look up a playlist
    pub fn playlist(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.get(id)
    }

    /// Known local songs
    pub fn library(&self) -> &[Song] {
        &self.library
    }

    /// Settings record
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Writes still in flight
    pub fn pending_writes(&self) -> usize {
        self.persister.pending()
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if events are waiting
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Take every persistence failure reported so far
    pub fn drain_persist_failures(&mut self) -> Vec<PersistFailure> {
        let mut failures = Vec::new();
        while let Ok(failure) = self.failures.try_recv() {
            failures.push(failure);
        }
        failures
    }

    // ===== Internal helpers =====

    fn emit(&mut self, event: SessionEvent) {
        self.pending_events.push(event);
    }

    fn emit_current(&mut self) {
        let path = self.queue.current_path().map(str::to_string);
        self.emit(SessionEvent::CurrentSongChanged { path });
    }

    fn select(&mut self, path: &str) {
        if self.queue.current_path() != Some(path) && self.queue.select(path) {
            self.emit_current();
        }
    }

    fn move_to(&mut self, index: usize) {
        let before = self.queue.current_path().map(str::to_string);
        self.queue.select_index(index);
        if self.queue.current_path() != before.as_deref() {
            self.emit_current();
        }
        self.set_playing(true);
    }

    fn replace_queue(&mut self, songs: Vec<Song>) {
        let dropped_current = self.queue.replace(songs, self.mode.rng_mut());
        self.emit(SessionEvent::QueueChanged {
            length: self.queue.len(),
        });
        if dropped_current {
            self.emit_current();
            self.set_playing(false);
        }
    }

    fn apply_transition(&mut self, transition: ModeTransition) {
        let reordered = match transition {
            ModeTransition::Unchanged => return,
            ModeTransition::Switched => self.mode.mode() == PlayMode::Shuffle,
            ModeTransition::Restored => {
                self.persist_queue();
                true
            }
        };

        self.emit(SessionEvent::ModeChanged {
            mode: self.mode.mode(),
        });
        if reordered {
            self.emit(SessionEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
    }

    fn merge_library(&mut self, songs: &[Song]) {
        self.library = merge_unique(&self.library, songs);
        self.persister.save_library(self.library.clone());
        self.emit(SessionEvent::LibraryChanged {
            length: self.library.len(),
        });
    }

    fn fail(&mut self, context: &str, error: SessionError) -> SessionError {
        tracing::error!("{}: {}", context, error);
        self.show_toast(format!("{context}: {error}"), ToastKind::Error);
        error
    }

    fn queue_changed(&mut self) {
        self.persist_queue();
        self.emit(SessionEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn persist_queue(&mut self) {
        self.persister.save_queue(self.queue.canonical().to_vec());
    }

    fn persist_playlists(&mut self) {
        self.persister.save_playlists(self.playlists.all().to_vec());
    }

    fn playlists_changed(&mut self) {
        self.persist_playlists();
        self.emit(SessionEvent::PlaylistsChanged {
            count: self.playlists.len(),
        });
    }

    fn settings_changed(&mut self) {
        self.persister.save_settings(self.settings.clone());
        self.emit(SessionEvent::SettingsChanged);
    }

    fn volume_changed(&mut self) {
        self.emit(SessionEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}

impl<S: SessionStore> std::fmt::Debug for SessionEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine")
            .field("queue", &self.queue)
            .field("mode", &self.mode.mode())
            .field("is_playing", &self.is_playing)
            .field("playlists", &self.playlists.len())
            .field("library", &self.library.len())
            .field("persister", &self.persister)
            .finish_non_exhaustive()
    }
}
