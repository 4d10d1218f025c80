//! Subcommands and their execution against a running engine

use crate::scanner::song_from_path;
use cadence_core::{PlaylistId, Scanner, SessionStore, Song};
use cadence_session::SessionEngine;
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show queue size, mode, volume and download folder
    Status,
    /// List the play queue
    Queue,
    /// List playlists
    Playlists {
        /// Also list each playlist's songs
        #[arg(short, long)]
        songs: bool,
    },
    /// Create a user playlist
    CreatePlaylist {
        /// Playlist name
        name: String,
    },
    /// Rename a playlist
    RenamePlaylist {
        /// Playlist id
        id: String,
        /// New name
        name: String,
    },
    /// Delete a playlist
    DeletePlaylist {
        /// Playlist id
        id: String,
    },
    /// Add a song to a playlist
    AddToPlaylist {
        /// Playlist id
        id: String,
        /// Song path
        path: PathBuf,
    },
    /// Toggle a song in favorites
    Favorite {
        /// Song path
        path: PathBuf,
    },
    /// Scan a directory into the library
    Scan {
        /// Directory path to scan
        dir: PathBuf,
    },
    /// Play a song, queueing it after the current one
    Play {
        /// Song path
        path: PathBuf,
    },
    /// Append songs to the end of the queue
    Enqueue {
        /// Song paths
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Queue a song to play next
    PlayNext {
        /// Song path
        path: PathBuf,
    },
    /// Replace the queue with a playlist's songs
    PlayPlaylist {
        /// Playlist id
        id: String,
    },
    /// Remove a song from the queue
    Remove {
        /// Song path
        path: PathBuf,
    },
    /// Refill the queue with the whole library
    Reset,
    /// Empty the queue
    Clear,
    /// Set or clear the download folder
    SetDownloadFolder {
        /// Folder for downloaded songs (omit to clear)
        folder: Option<PathBuf>,
    },
    /// Set the volume (0-100)
    Volume {
        /// Volume level
        level: u8,
    },
}

/// Run `command` and return the lines to print
pub async fn execute<S: SessionStore>(
    engine: &mut SessionEngine<S>,
    scanner: &dyn Scanner,
    command: Command,
) -> anyhow::Result<Vec<String>> {
    let mut out = Vec::new();

    match command {
        Command::Status => {
            out.push(format!("Queue: {} songs", engine.queue().len()));
            out.push(format!("Library: {} songs", engine.library().len()));
            out.push(format!("Playlists: {}", engine.playlists().len()));
            out.push(format!("Mode: {:?}", engine.play_mode()));
            out.push(format!("Volume: {}", engine.volume()));
            out.push(match &engine.settings().download_folder {
                Some(folder) => format!("Download folder: {}", folder.display()),
                None => "Download folder: not set".to_string(),
            });
        }
        Command::Queue => {
            out.extend(list_songs(engine.queue()));
        }
        Command::Playlists { songs } => {
            for playlist in engine.playlists() {
                out.push(format!(
                    "{}  {} ({} songs)",
                    playlist.id,
                    playlist.name,
                    playlist.songs.len()
                ));
                if songs {
                    out.extend(list_songs(&playlist.songs).map(|line| format!("    {line}")));
                }
            }
        }
        Command::CreatePlaylist { name } => {
            let id = engine.create_playlist(name);
            out.push(format!("Created playlist {id}"));
        }
        Command::RenamePlaylist { id, name } => {
            let id = existing_playlist(engine, &id)?;
            engine.rename_playlist(&id, name);
            out.push(format!("Renamed playlist {id}"));
        }
        Command::DeletePlaylist { id } => {
            let id = existing_playlist(engine, &id)?;
            engine.delete_playlist(&id);
            out.push(format!("Deleted playlist {id}"));
        }
        Command::AddToPlaylist { id, path } => {
            let id = existing_playlist(engine, &id)?;
            let song = lookup_song(engine, &path);
            out.push(format!("Added {} to {id}", song.name));
            engine.add_song_to_playlist(&id, song);
        }
        Command::Favorite { path } => {
            let song = lookup_song(engine, &path);
            let name = song.name.clone();
            if engine.toggle_favorite(song) {
                out.push(format!("Added {name} to favorites"));
            } else {
                out.push(format!("Removed {name} from favorites"));
            }
        }
        Command::Scan { dir } => {
            let found = engine.scan_music(scanner, &dir).await?;
            out.push(format!(
                "Scanned {found} songs, library now has {}",
                engine.library().len()
            ));
        }
        Command::Play { path } => {
            let song = lookup_song(engine, &path);
            out.push(format!("Playing {}", song.name));
            engine.play_song(song);
        }
        Command::Enqueue { paths } => {
            let songs: Vec<Song> = paths.iter().map(|p| lookup_song(engine, p)).collect();
            engine.add_music(&songs);
            out.push(format!("Queue: {} songs", engine.queue().len()));
        }
        Command::PlayNext { path } => {
            let song = lookup_song(engine, &path);
            out.push(format!("Queued {} next", song.name));
            engine.add_to_next(song);
        }
        Command::PlayPlaylist { id } => {
            let id = existing_playlist(engine, &id)?;
            let songs = engine
                .playlist(&id)
                .map(|p| p.songs.clone())
                .unwrap_or_default();
            if songs.is_empty() {
                out.push(format!("Playlist {id} is empty"));
            } else {
                out.push(format!("Playing {} songs from {id}", songs.len()));
                engine.play_playlist(songs);
            }
        }
        Command::Remove { path } => {
            let path = path.to_string_lossy();
            engine.remove_from_queue(&path);
            out.push(format!("Queue: {} songs", engine.queue().len()));
        }
        Command::Reset => {
            engine.reset_queue();
            out.push(format!("Queue: {} songs", engine.queue().len()));
        }
        Command::Clear => {
            engine.clear_queue();
            out.push("Queue cleared".to_string());
        }
        Command::SetDownloadFolder { folder } => {
            out.push(match &folder {
                Some(folder) => format!("Download folder set to {}", folder.display()),
                None => "Download folder cleared".to_string(),
            });
            engine.set_download_folder(folder);
        }
        Command::Volume { level } => {
            engine.set_volume(level);
            out.push(format!("Volume: {}", engine.volume()));
        }
    }

    Ok(out)
}

fn list_songs(songs: &[Song]) -> impl Iterator<Item = String> + '_ {
    songs
        .iter()
        .enumerate()
        .map(|(i, song)| format!("{:>3}. {}  ({})", i + 1, song.name, song.path))
}

fn existing_playlist<S: SessionStore>(
    engine: &SessionEngine<S>,
    id: &str,
) -> anyhow::Result<PlaylistId> {
    let id = PlaylistId::new(id);
    if engine.playlist(&id).is_none() {
        anyhow::bail!("No playlist with id {id}");
    }
    Ok(id)
}

/// Known record for `path` from the queue or library, else a fresh local song
fn lookup_song<S: SessionStore>(engine: &SessionEngine<S>, path: &Path) -> Song {
    let key = path.to_string_lossy();
    engine
        .queue()
        .iter()
        .chain(engine.library())
        .find(|s| s.path == key)
        .cloned()
        .unwrap_or_else(|| song_from_path(path))
}
