//! Debounced workspace autosave.
//!
//! The store offers a snapshot after every settled change. Offers go into
//! a `watch` channel, so only the newest snapshot is kept; the worker saves
//! once the channel has been quiet for the debounce window. Dropping every
//! handle flushes the last snapshot and stops the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use gardenkit_core::{EventBus, StoreEvent};
use gardenkit_designer::model::WorkspaceData;
use gardenkit_designer::persistence::{PersistenceProvider, SnapshotSink};

type Snapshot = Option<Arc<WorkspaceData>>;

/// Sending side of the autosave worker; attach it to the store with
/// `WorkspaceStore::with_sink`.
#[derive(Debug)]
pub struct AutosaveHandle {
    tx: watch::Sender<Snapshot>,
    pending: Arc<AtomicBool>,
}

impl SnapshotSink for AutosaveHandle {
    fn offer(&self, data: &WorkspaceData) {
        self.pending.store(true, Ordering::SeqCst);
        // a closed channel means the worker is gone; nothing left to do
        let _ = self.tx.send(Some(Arc::new(data.clone())));
    }

    fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
}

/// Starts the autosave worker on the current tokio runtime.
pub fn spawn_autosave(
    provider: Arc<dyn PersistenceProvider>,
    tenant: impl Into<String>,
    debounce: Duration,
    events: Arc<EventBus>,
) -> (Arc<AutosaveHandle>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(None);
    let pending = Arc::new(AtomicBool::new(false));
    let worker = AutosaveWorker {
        provider,
        tenant: tenant.into(),
        debounce,
        events,
        pending: pending.clone(),
    };
    let task = tokio::spawn(worker.run(rx));
    (Arc::new(AutosaveHandle { tx, pending }), task)
}

struct AutosaveWorker {
    provider: Arc<dyn PersistenceProvider>,
    tenant: String,
    debounce: Duration,
    events: Arc<EventBus>,
    pending: Arc<AtomicBool>,
}

impl AutosaveWorker {
    async fn run(self, mut rx: watch::Receiver<Snapshot>) {
        tracing::debug!("Autosave worker started for tenant '{}'", self.tenant);
        loop {
            if rx.changed().await.is_err() {
                break;
            }
            let closed = Self::settle(&mut rx, self.debounce).await;
            let snapshot = rx.borrow_and_update().clone();
            if let Some(data) = snapshot {
                let event = self.save(data).await;
                if !rx.has_changed().unwrap_or(false) {
                    self.pending.store(false, Ordering::SeqCst);
                }
                // nobody listening is fine
                let _ = self.events.publish(event);
            }
            if closed {
                break;
            }
        }
        tracing::debug!("Autosave worker stopped for tenant '{}'", self.tenant);
    }

    /// Waits until no new snapshot arrived for `debounce`. Returns true if
    /// the sending side went away meanwhile.
    async fn settle(rx: &mut watch::Receiver<Snapshot>, debounce: Duration) -> bool {
        loop {
            match tokio::time::timeout(debounce, rx.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => return true,
                Err(_) => return false,
            }
        }
    }

    async fn save(&self, data: Arc<WorkspaceData>) -> StoreEvent {
        let provider = self.provider.clone();
        let tenant = self.tenant.clone();
        let result = tokio::task::spawn_blocking(move || provider.save(&tenant, &data)).await;
        match result {
            Ok(Ok(())) => {
                tracing::debug!("Autosaved workspace for tenant '{}'", self.tenant);
                StoreEvent::Saved {
                    tenant: self.tenant.clone(),
                }
            }
            Ok(Err(e)) => {
                tracing::warn!("Autosave failed for tenant '{}': {}", self.tenant, e);
                StoreEvent::Failure {
                    message: format!("Autosave failed: {e}"),
                }
            }
            Err(e) => {
                tracing::warn!("Autosave task failed: {}", e);
                StoreEvent::Failure {
                    message: format!("Autosave failed: {e}"),
                }
            }
        }
    }
}
