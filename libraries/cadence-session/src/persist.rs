//! Fire-and-forget persistence
//!
//! Each write is a background task holding a full snapshot of one
//! collection. Writes to the same collection commit in dispatch order, so
//! the newest snapshot is always the one left in the store. Writes to
//! different collections are not ordered against each other. A failure is
//! logged, reported on the failure channel and never retried.

use cadence_core::{Playlist, SessionStore, Settings, Song};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

/// Which collection a write targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistTarget {
    /// The play queue
    Queue,
    /// The library
    Library,
    /// The playlist collection
    Playlists,
    /// The settings record
    Settings,
}

impl fmt::Display for PersistTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PersistTarget::Queue => "queue",
            PersistTarget::Library => "library",
            PersistTarget::Playlists => "playlists",
            PersistTarget::Settings => "settings",
        };
        f.write_str(name)
    }
}

/// A write that did not make it to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistFailure {
    /// Collection the write targeted
    pub target: PersistTarget,
    /// Store error message
    pub message: String,
}

/// Dispatches snapshot writes onto the tokio runtime
///
/// Must be used from within a runtime.
pub struct Persister<S: SessionStore> {
    store: Arc<S>,
    tasks: JoinSet<()>,
    /// Completion signal of the last write dispatched per target
    last_write: HashMap<PersistTarget, oneshot::Receiver<()>>,
    failures: mpsc::UnboundedSender<PersistFailure>,
}

impl<S: SessionStore> Persister<S> {
    /// Create a persister and the receiving end of its failure channel
    pub fn new(store: Arc<S>) -> (Self, mpsc::UnboundedReceiver<PersistFailure>) {
        let (failures, rx) = mpsc::unbounded_channel();
        (
            Self {
                store,
                tasks: JoinSet::new(),
                last_write: HashMap::new(),
                failures,
            },
            rx,
        )
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Number of writes not yet reaped
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Persist the queue in canonical order
    pub fn save_queue(&mut self, songs: Vec<Song>) {
        self.dispatch(PersistTarget::Queue, move |store| async move {
            store.save_play_queue(&songs).await
        });
    }

    /// Persist the library
    pub fn save_library(&mut self, songs: Vec<Song>) {
        self.dispatch(PersistTarget::Library, move |store| async move {
            store.save_to_library(&songs).await
        });
    }

    /// Persist the entire playlist collection
    pub fn save_playlists(&mut self, playlists: Vec<Playlist>) {
        self.dispatch(PersistTarget::Playlists, move |store| async move {
            store.save_playlists(&playlists).await
        });
    }

    /// Persist the settings record
    pub fn save_settings(&mut self, settings: Settings) {
        self.dispatch(PersistTarget::Settings, move |store| async move {
            store.save_settings(&settings).await
        });
    }

    /// Wait for every outstanding write
    pub async fn flush(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                tracing::error!("Persistence task aborted: {}", e);
            }
        }
    }

    fn dispatch<F, Fut>(&mut self, target: PersistTarget, write: F)
    where
        F: FnOnce(Arc<S>) -> Fut,
        Fut: Future<Output = cadence_core::Result<()>> + Send + 'static,
    {
        self.reap();

        let failures = self.failures.clone();
        let write = write(Arc::clone(&self.store));
        let previous = self.last_write.remove(&target);
        let (done, done_rx) = oneshot::channel();
        self.last_write.insert(target, done_rx);

        tracing::debug!("Persisting {}", target);
        self.tasks.spawn(async move {
            // Sender dropped without a send means the earlier write panicked
            if let Some(previous) = previous {
                let _ = previous.await;
            }

            let result = write.await;
            let _ = done.send(());

            if let Err(e) = result {
                tracing::error!("Failed to persist {}: {}", target, e);
                // Receiver gone means nobody is listening any more
                let _ = failures.send(PersistFailure {
                    target,
                    message: e.to_string(),
                });
            }
        });
    }

    /// Drop finished tasks so the set does not grow unbounded
    fn reap(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(e) = result {
                tracing::error!("Persistence task aborted: {}", e);
            }
        }
    }
}

impl<S: SessionStore> fmt::Debug for Persister<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persister")
            .field("pending", &self.tasks.len())
            .finish_non_exhaustive()
    }
}
