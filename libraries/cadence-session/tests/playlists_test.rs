//! Playlist collection and reconciler scenarios

mod common;

use cadence_core::{Playlist, PlaylistId, PlaylistKind, Song};
use cadence_session::{SessionConfig, SessionEngine, SessionEvent};
use common::*;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn startup_creates_both_system_playlists_once() {
    let (engine, store) = empty_engine().await;
    engine.shutdown().await;

    let saved = store.saved_playlists();
    let kinds: Vec<PlaylistKind> = saved.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PlaylistKind::LocalLibrary, PlaylistKind::Favorites]);
    assert_eq!(saved[0].id, PlaylistId::local_library());
    assert_eq!(saved[0].name, "Local Music");
    assert_eq!(saved[1].id, PlaylistId::favorites());

    let writes = store.playlist_writes();
    let engine = SessionEngine::start(Arc::clone(&store), seeded_config()).await;
    engine.shutdown().await;
    assert_eq!(store.playlist_writes(), writes);
    assert_eq!(store.saved_playlists().len(), 2);
}

#[tokio::test]
async fn system_playlist_names_come_from_config() {
    let store = Arc::new(MemoryStore::default());
    let config = SessionConfig {
        local_library_name: "On Disk".to_string(),
        favorites_name: "Loved".to_string(),
        ..SessionConfig::default()
    };

    let engine = SessionEngine::start(Arc::clone(&store), config).await;

    assert_eq!(engine.playlist(&PlaylistId::local_library()).unwrap().name, "On Disk");
    assert_eq!(engine.playlist(&PlaylistId::favorites()).unwrap().name, "Loved");
}

#[tokio::test]
async fn create_and_edit_user_playlist_persists_whole_collection() {
    let (mut engine, store) = empty_engine().await;

    let id = engine.create_playlist("Night Drive");
    engine.add_song_to_playlist(&id, song("a"));
    engine.add_song_to_playlist(&id, song("b"));
    engine.remove_song_from_playlist(&id, &path("a"));
    engine.rename_playlist(&id, "Late Night Drive");
    engine.flush().await;

    let saved = store.saved_playlists();
    assert_eq!(saved.len(), 3);
    let playlist = saved.iter().find(|p| p.id == id).unwrap();
    assert_eq!(playlist.name, "Late Night Drive");
    assert_eq!(playlist.songs, vec![song("b")]);
    assert_eq!(playlist.kind, PlaylistKind::User);
    assert_eq!(saved, engine.playlists());
}

#[tokio::test]
async fn favorites_add_twice_keeps_one_copy() {
    let (mut engine, _store) = empty_engine().await;
    let favorites = PlaylistId::favorites();

    engine.add_song_to_playlist(&favorites, song("x"));
    engine.add_song_to_playlist(&favorites, song("x"));

    assert_eq!(engine.playlist(&favorites).unwrap().songs, vec![song("x")]);
    assert!(engine.is_favorite(&path("x")));
}

#[tokio::test]
async fn toggle_favorite_flips_membership() {
    let (mut engine, _store) = empty_engine().await;

    assert!(engine.toggle_favorite(song("x")));
    assert!(engine.is_favorite(&path("x")));
    assert!(!engine.toggle_favorite(song("x")));
    assert!(!engine.is_favorite(&path("x")));
}

#[tokio::test]
async fn create_system_playlist_is_idempotent() {
    let (mut engine, store) = empty_engine().await;
    engine.flush().await;
    let writes = store.playlist_writes();

    engine.create_system_playlist(PlaylistKind::Favorites, "Favorites again");
    engine.flush().await;

    assert_eq!(engine.playlists().len(), 2);
    assert_eq!(store.playlist_writes(), writes);
}

#[tokio::test]
async fn deleted_system_playlist_comes_back_on_next_start() {
    let (mut engine, store) = empty_engine().await;

    engine.delete_playlist(&PlaylistId::favorites());
    assert!(engine.playlist(&PlaylistId::favorites()).is_none());
    engine.shutdown().await;
    assert_eq!(store.saved_playlists().len(), 1);

    let engine = SessionEngine::start(Arc::clone(&store), seeded_config()).await;
    assert!(engine.playlist(&PlaylistId::favorites()).is_some());
}

#[tokio::test]
async fn misses_write_nothing() {
    let (mut engine, store) = empty_engine().await;
    engine.flush().await;
    let writes = store.playlist_writes();
    let missing = PlaylistId::new("missing");

    engine.delete_playlist(&missing);
    engine.add_song_to_playlist(&missing, song("a"));
    engine.remove_song_from_playlist(&missing, &path("a"));
    engine.remove_song_from_playlist(&PlaylistId::favorites(), &path("a"));
    engine.update_playlist_songs(&missing, vec![song("a")]);
    engine.rename_playlist(&missing, "x");
    engine.flush().await;

    assert_eq!(store.playlist_writes(), writes);
}

#[tokio::test]
async fn update_playlist_songs_replaces_wholesale() {
    let (mut engine, _store) = empty_engine().await;
    let id = engine.create_playlist("Mine");
    engine.add_song_to_playlist(&id, song("old"));
    engine.drain_events();

    engine.update_playlist_songs(&id, vec![song("a"), song("b"), song("a")]);

    assert_eq!(engine.playlist(&id).unwrap().songs, vec![song("a"), song("b")]);
    assert_eq!(
        engine.drain_events(),
        vec![SessionEvent::PlaylistsChanged { count: 3 }]
    );
}

#[tokio::test]
async fn reconciler_rewrites_queue_playlists_and_library() {
    let online = Song::online("http://x", "X", "BV1x", 2);
    let store = MemoryStore::with_queue(vec![song("a"), online.clone(), song("c")]);
    let (mut engine, store) = engine_with(store).await;
    let user = engine.create_playlist("Mine");
    engine.add_song_to_playlist(&user, online.clone());
    engine.play_song(online);

    engine
        .convert_online_to_local("http://x", "/local/x.mp3", "Song X")
        .await;
    engine.flush().await;

    let record = Song::downloaded("/local/x.mp3", "Song X");
    assert!(!record.is_online);
    assert!(record.is_downloaded);
    assert_eq!(record.bv_id, None);

    assert_eq!(engine.queue()[1], record);
    assert_eq!(engine.current_song(), Some(&record));
    assert_eq!(engine.playlist(&user).unwrap().songs, vec![record.clone()]);
    assert_eq!(
        engine.playlist(&PlaylistId::local_library()).unwrap().songs,
        vec![record.clone()]
    );
    assert_eq!(engine.library(), &[record.clone()][..]);

    assert_eq!(store.saved_queue()[1], record);
    assert_eq!(store.saved_library(), vec![record]);
    assert_eq!(store.saved_playlists(), engine.playlists());
}

#[tokio::test]
async fn reconciler_appends_when_queue_lacks_track() {
    let (mut engine, _store) = engine_with(MemoryStore::with_queue(vec![song("a")])).await;

    engine
        .convert_online_to_local("http://gone", "/local/gone.mp3", "Gone")
        .await;

    assert_eq!(
        paths(engine.queue()),
        vec![path("a"), "/local/gone.mp3".to_string()]
    );
}

#[tokio::test]
async fn reconciler_dedups_when_local_copy_already_present() {
    let local_old = Song::local("/local/x.mp3", "old name");
    let online = Song::online("http://x", "X", "BV1x", 1);
    let (mut engine, _store) =
        engine_with(MemoryStore::with_queue(vec![local_old, online])).await;

    engine
        .convert_online_to_local("http://x", "/local/x.mp3", "Song X")
        .await;

    assert_eq!(engine.queue(), &[Song::downloaded("/local/x.mp3", "Song X")][..]);
}

#[tokio::test]
async fn reconciler_picks_up_playlists_saved_elsewhere() {
    let (mut engine, store) = empty_engine().await;
    engine.flush().await;

    let mut external = Playlist::new("Edited elsewhere");
    external.songs.push(Song::online("http://x", "X", "BV1x", 1));
    store.playlists.lock().unwrap().push(external.clone());

    engine
        .convert_online_to_local("http://x", "/local/x.mp3", "Song X")
        .await;

    let reloaded = engine.playlist(&external.id).unwrap();
    assert_eq!(
        reloaded.songs,
        vec![Song::downloaded("/local/x.mp3", "Song X")]
    );
}

#[tokio::test]
async fn reconciler_falls_back_to_memory_when_reload_fails() {
    let online = Song::online("http://x", "X", "BV1x", 1);
    let (mut engine, store) = engine_with(MemoryStore::with_queue(vec![online.clone()])).await;
    let user = engine.create_playlist("Mine");
    engine.add_song_to_playlist(&user, online);
    engine.flush().await;

    // A successful reload would drop "Mine"
    store.playlists.lock().unwrap().clear();
    store.fail_playlist_loads.store(true, Ordering::SeqCst);

    engine
        .convert_online_to_local("http://x", "/local/x.mp3", "Song X")
        .await;
    engine.flush().await;

    let record = Song::downloaded("/local/x.mp3", "Song X");
    assert_eq!(engine.playlists().len(), 3);
    assert_eq!(engine.playlist(&user).unwrap().songs, vec![record.clone()]);
    assert_eq!(
        engine.playlist(&PlaylistId::local_library()).unwrap().songs,
        vec![record.clone()]
    );
    assert_eq!(engine.queue(), &[record][..]);
    assert_eq!(store.saved_playlists(), engine.playlists());
}

#[tokio::test]
async fn reconciler_keeps_shuffle_snapshot_in_sync() {
    let online = Song::online("http://x", "X", "BV1x", 1);
    let (mut engine, store) =
        engine_with(MemoryStore::with_queue(vec![song("a"), online, song("c"), song("d")])).await;
    engine.toggle_shuffle();

    engine
        .convert_online_to_local("http://x", "/local/x.mp3", "Song X")
        .await;
    engine.flush().await;

    let snapshot = paths(engine.shuffle_snapshot().unwrap());
    assert_eq!(
        snapshot,
        vec![path("a"), "/local/x.mp3".to_string(), path("c"), path("d")]
    );
    assert_eq!(paths(&store.saved_queue()), snapshot);
    assert!(engine.queue().iter().any(|s| s.path == "/local/x.mp3"));
}
