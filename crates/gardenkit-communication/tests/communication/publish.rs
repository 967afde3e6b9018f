use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gardenkit_communication::{PublishEndpoint, PublishReply, PublishRequest, PublishResponse, Publisher};
use gardenkit_core::{Error, EventBus, Point, PublishError};
use gardenkit_designer::model::ItemType;
use gardenkit_designer::WorkspaceStore;
use gardenkit_settings::EditorConfig;
use parking_lot::Mutex;
use tokio::sync::Notify;

/// Endpoint answering with a fixed reply, optionally held until released.
struct FakeEndpoint {
    reply: Result<PublishReply, PublishError>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    last: Mutex<Option<PublishRequest>>,
}

impl FakeEndpoint {
    fn new(reply: Result<PublishReply, PublishError>) -> Self {
        Self {
            reply,
            gate: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }
}

#[async_trait]
impl PublishEndpoint for FakeEndpoint {
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReply, PublishError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.reply.clone()
    }
}

fn success() -> PublishReply {
    PublishReply::Success(PublishResponse {
        items_written: 1,
        layout_id: Some("srv-1".into()),
        view_url: None,
    })
}

fn store_with_two_layouts() -> (Mutex<WorkspaceStore>, String, String) {
    let mut store = WorkspaceStore::seeded(&EditorConfig::default(), Arc::new(EventBus::new()));
    store.add_item_at_world(ItemType::Bed, Point::new(100.0, 100.0));
    let first = store.active_layout_id().to_string();
    let garden = store.active_garden_id().to_string();
    let second = store.create_layout(&garden, "Summer").unwrap();
    store.mark_published(&second).unwrap();
    (Mutex::new(store), first, second)
}

#[tokio::test]
async fn test_publish_marks_layout_after_ack() {
    let endpoint = Arc::new(FakeEndpoint::new(Ok(success())));
    let publisher = Publisher::new(endpoint.clone(), "acme");
    let (store, first, second) = store_with_two_layouts();

    let response = publisher.publish_layout(&store, &first).await.unwrap();
    assert_eq!(response.items_written, 1);

    let request = endpoint.last.lock().clone().unwrap();
    assert_eq!(request.workplace_slug, "acme");
    assert_eq!(request.area_name, "My Garden");
    assert_eq!(request.layout_name, "Main Layout");
    assert_eq!(request.doc.items.len(), 1);

    let store = store.lock();
    let published: Vec<_> = store.layouts().iter().filter(|l| l.published).collect();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, first);
    assert!(store.layouts().iter().any(|l| l.id == second && !l.published));
}

#[tokio::test]
async fn test_rejected_publish_leaves_flags() {
    let endpoint = Arc::new(FakeEndpoint::new(Ok(PublishReply::Failure {
        error: "quota exceeded".into(),
    })));
    let publisher = Publisher::new(endpoint, "acme");
    let (store, first, second) = store_with_two_layouts();
    let doc_before = store.lock().doc().clone();

    let err = publisher.publish_layout(&store, &first).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Publish(PublishError::Rejected { ref message }) if message == "quota exceeded"
    ));

    let store = store.lock();
    assert_eq!(store.doc(), &doc_before);
    assert!(store.layouts().iter().any(|l| l.id == second && l.published));
    assert!(store.layouts().iter().any(|l| l.id == first && !l.published));
}

#[tokio::test]
async fn test_transport_failure_is_recoverable() {
    let endpoint = Arc::new(FakeEndpoint::new(Err(PublishError::Transport {
        message: "connection reset".into(),
    })));
    let publisher = Publisher::new(endpoint, "acme");
    let (store, first, _) = store_with_two_layouts();

    let err = publisher.publish_layout(&store, &first).await.unwrap_err();
    assert!(matches!(err, Error::Publish(PublishError::Transport { .. })));
    assert!(!publisher.is_publishing(&first));
}

#[tokio::test]
async fn test_unknown_layout() {
    let publisher = Publisher::new(Arc::new(FakeEndpoint::new(Ok(success()))), "acme");
    let (store, _, _) = store_with_two_layouts();
    let err = publisher.publish_layout(&store, "missing").await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn test_concurrent_publish_suppressed() {
    let gate = Arc::new(Notify::new());
    let mut endpoint = FakeEndpoint::new(Ok(success()));
    endpoint.gate = Some(gate.clone());
    let endpoint = Arc::new(endpoint);
    let publisher = Arc::new(Publisher::new(endpoint.clone(), "acme"));
    let (store, first, _) = store_with_two_layouts();
    let store = Arc::new(store);

    let running = {
        let publisher = publisher.clone();
        let store = store.clone();
        let first = first.clone();
        tokio::spawn(async move { publisher.publish_layout(&store, &first).await })
    };
    while endpoint.calls.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    let err = publisher.publish_layout(&store, &first).await.unwrap_err();
    assert!(matches!(err, Error::Publish(PublishError::InFlight { .. })));
    assert_eq!(endpoint.calls.load(Ordering::SeqCst), 1);

    gate.notify_one();
    assert!(running.await.unwrap().is_ok());
}
