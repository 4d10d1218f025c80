//! CLI configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then `CADENCE_*`
//! environment variables. Nested keys use a double underscore, e.g.
//! `CADENCE_SESSION__TOAST_DURATION_MS`.

use cadence_session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// `SQLite` database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Engine settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            session: SessionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `file` (or `cadence.toml` if present) and the process environment
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(file, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_from(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        match file {
            // An explicitly requested file must exist
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./data/cadence.db")
}
