//! Error types for session operations

use cadence_core::CadenceError;
use thiserror::Error;

/// Session errors
///
/// Only the async, collaborator-driven operations return these. Every
/// failure is also logged and shown as an error toast before it is returned.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A download was requested but no download folder is configured
    #[error("No download folder configured")]
    NoDownloadFolder,

    /// The song has no remote source to download from
    #[error("Not an online track: {0}")]
    NotOnline(String),

    /// A store, scanner, resolver or downloader call failed
    #[error(transparent)]
    Collaborator(#[from] CadenceError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
