mod ids;
mod playlist;
mod settings;
pub mod song;

pub use ids::PlaylistId;
pub use playlist::{Playlist, PlaylistKind};
pub use settings::{Settings, MAX_VOLUME};
pub use song::{contains_path, dedup_by_path, merge_unique, position_of, Song};
