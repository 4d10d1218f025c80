//! Transient toast notifications
//!
//! One toast at a time; a new one replaces the old. Expiry is checked on
//! read against `tokio::time::Instant`, so a paused test clock controls it.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Neutral information
    Info,
}

/// A visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text shown to the user
    pub message: String,
    /// Severity
    pub kind: ToastKind,
    /// When the toast stops being visible
    pub deadline: Instant,
}

/// Holds at most one toast
#[derive(Debug, Clone)]
pub struct Notifier {
    duration: Duration,
    current: Option<Toast>,
}

impl Notifier {
    /// Toasts stay visible for `duration`
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    /// Replace any current toast
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.current = Some(Toast {
            message: message.into(),
            kind,
            deadline: Instant::now() + self.duration,
        });
    }

    /// Clear the toast immediately
    ///
    /// Returns true if one was still visible.
    pub fn hide(&mut self) -> bool {
        let visible = self.current().is_some();
        self.current = None;
        visible
    }

    /// The toast, unless its deadline has passed
    pub fn current(&self) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| Instant::now() < toast.deadline)
    }
}
