use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gardenkit_core::{EventBus, EventCategory, EventFilter, StoreEvent};

#[test]
fn test_category_filter() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let id = bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Persistence]),
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    bus.publish(StoreEvent::WorkspaceChanged).unwrap();
    bus.publish(StoreEvent::Saved {
        tenant: "t".into(),
    })
    .unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    assert!(bus.unsubscribe(id));
    assert!(bus.publish(StoreEvent::WorkspaceChanged).is_err());
}

#[tokio::test]
async fn test_async_receiver() {
    let bus = EventBus::new();
    let mut rx = bus.receiver();
    bus.publish(StoreEvent::SelectionChanged { count: 2 }).unwrap();
    assert_eq!(rx.recv().await.unwrap(), StoreEvent::SelectionChanged { count: 2 });
}

#[test]
fn test_settled_changes() {
    assert!(StoreEvent::WorkspaceChanged.is_settled_change());
    assert!(!StoreEvent::SelectionChanged { count: 0 }.is_settled_change());
}
