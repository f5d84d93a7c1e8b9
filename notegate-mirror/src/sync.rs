//! Single-writer mirror synchronization.
//!
//! Request handlers do not publish directly; they signal this worker,
//! which reads a fresh full snapshot and publishes it. A capacity-1
//! channel coalesces bursts: if a publish is already pending, a second
//! signal is dropped and its data is picked up by the pending read.
//! One writer means publishes cannot race and finish out of order, so
//! the mirror never regresses to an older snapshot.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use notegate_store::NoteStore;

use crate::{MirrorError, MirrorPublisher};

/// Handle to the background sync worker.
#[derive(Debug, Clone)]
pub struct MirrorSync {
    tx: mpsc::Sender<()>,
}

impl MirrorSync {
    /// Spawn the worker on the current runtime.
    #[must_use]
    pub fn spawn(store: Arc<NoteStore>, publisher: Arc<dyn MirrorPublisher>) -> Self {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(sync_loop(rx, store, publisher));
        Self { tx }
    }

    /// Signal that the store changed and the mirror should catch up.
    ///
    /// Never blocks: a full channel means a publish is already queued
    /// and will observe this change when it reads its snapshot.
    pub fn notify(&self) {
        let _ = self.tx.try_send(());
    }
}

async fn sync_loop(
    mut rx: mpsc::Receiver<()>,
    store: Arc<NoteStore>,
    publisher: Arc<dyn MirrorPublisher>,
) {
    while rx.recv().await.is_some() {
        if let Err(e) = sync_once(&store, publisher.as_ref()).await {
            // Not retried here: the next submission re-signals, and
            // every publish carries the complete current snapshot.
            warn!(error = %e, "mirror publish failed; will catch up on next change");
        }
    }
    debug!("mirror sync worker stopped");
}

/// Read the full note set and publish it as one snapshot.
///
/// # Errors
/// Returns [`MirrorError`] for a failed snapshot read or publish; the
/// worker logs it and moves on.
pub async fn sync_once(
    store: &Arc<NoteStore>,
    publisher: &dyn MirrorPublisher,
) -> Result<(), MirrorError> {
    let store = Arc::clone(store);
    let snapshot = match tokio::task::spawn_blocking(move || store.list_all()).await {
        Ok(Ok(notes)) => notes,
        Ok(Err(e)) => return Err(MirrorError::Snapshot(e)),
        Err(e) => {
            error!(error = %e, "snapshot task panicked");
            return Err(MirrorError::SnapshotTask(e.to_string()));
        }
    };
    publisher.publish(&snapshot).await
}
