use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gardenkit_communication::spawn_autosave;
use gardenkit_core::{EventBus, PersistenceError, Point, StoreEvent};
use gardenkit_designer::model::{ItemType, WorkspaceData};
use gardenkit_designer::persistence::{MemoryProvider, PersistenceProvider};
use gardenkit_designer::WorkspaceStore;
use gardenkit_settings::EditorConfig;

#[derive(Default)]
struct CountingProvider {
    inner: MemoryProvider,
    saves: AtomicUsize,
}

impl PersistenceProvider for CountingProvider {
    fn load(&self, key: &str) -> Result<Option<WorkspaceData>, PersistenceError> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, data: &WorkspaceData) -> Result<(), PersistenceError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(key, data)
    }
}

async fn wait_for_saved(rx: &mut tokio::sync::broadcast::Receiver<StoreEvent>) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(StoreEvent::Saved { .. }) = rx.recv().await {
                return;
            }
        }
    })
    .await
    .expect("autosave never completed");
}

#[tokio::test]
async fn test_burst_of_edits_saves_once() {
    let bus = Arc::new(EventBus::new());
    let mut saved = bus.receiver();
    let provider = Arc::new(CountingProvider::default());
    let (handle, _task) = spawn_autosave(provider.clone(), "tenant", Duration::from_millis(30), bus.clone());
    let mut store = WorkspaceStore::seeded(&EditorConfig::default(), bus).with_sink(handle.clone());

    for i in 0..5 {
        store.add_item_at_world(ItemType::Bed, Point::new(i as f64 * 150.0, 0.0));
    }
    assert!(store.has_pending_save());
    assert!(store.display_name().ends_with('*'));

    wait_for_saved(&mut saved).await;
    assert_eq!(provider.saves.load(Ordering::SeqCst), 1);
    assert!(!store.has_pending_save());

    let stored = provider.load("tenant").unwrap().unwrap();
    assert_eq!(stored, store.snapshot());
}

#[tokio::test]
async fn test_dropping_store_flushes_last_snapshot() {
    let bus = Arc::new(EventBus::new());
    let provider = Arc::new(CountingProvider::default());
    let (handle, task) = spawn_autosave(provider.clone(), "tenant", Duration::from_secs(60), bus.clone());
    let mut store = WorkspaceStore::seeded(&EditorConfig::default(), bus).with_sink(handle);
    store.add_item_at_world(ItemType::Tree, Point::ZERO);
    let expected = store.snapshot();

    drop(store);
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("worker did not stop")
        .unwrap();
    assert_eq!(provider.load("tenant").unwrap(), Some(expected));
}
