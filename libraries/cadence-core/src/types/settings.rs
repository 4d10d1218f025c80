//! Persisted application settings
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum volume level
pub const MAX_VOLUME: u8 = 100;

/// Single persisted settings record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Where downloaded online tracks are saved
    #[serde(default)]
    pub download_folder: Option<PathBuf>,

    /// Output volume (0-100), `None` until the user has picked one
    #[serde(default)]
    pub volume: Option<u8>,
}
