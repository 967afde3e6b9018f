use std::sync::Arc;

use gardenkit_core::{EventBus, EventCategory, EventFilter, Point, StoreEvent};
use gardenkit_designer::keyboard::{map_key, Key, KeyEvent, Modifiers};
use gardenkit_designer::model::{Corner, ItemType};
use gardenkit_designer::transform::{HandleHit, HandleKind, TransformModifiers};
use gardenkit_designer::{ItemPatch, WorkspaceStore};
use gardenkit_settings::EditorConfig;
use parking_lot::Mutex;

fn store() -> WorkspaceStore {
    WorkspaceStore::seeded(&EditorConfig::default(), Arc::new(EventBus::new()))
}

#[test]
fn test_add_item_on_empty_document() {
    let mut store = store();
    assert!(store.doc().items.is_empty());

    let id = store.add_item_at_world(ItemType::Bed, Point::new(100.0, 100.0));
    let item = store.doc().item(&id).unwrap();
    assert_eq!((item.w, item.h), ItemType::Bed.default_size());
    assert_eq!(item.center(), Point::new(100.0, 100.0));
    assert_eq!(item.order, 1);
    assert_eq!(item.meta.code.as_deref(), Some("BED-001"));
}

#[test]
fn test_corner_resize_keeps_top_left() {
    let mut store = store();
    let id = store.add_item_at_world(ItemType::Bed, Point::ZERO);
    store
        .update_item(
            &id,
            ItemPatch {
                x: Some(0.0),
                y: Some(0.0),
                w: Some(200.0),
                h: Some(120.0),
                ..ItemPatch::default()
            },
        )
        .unwrap();
    store.set_selection([id.clone()]);

    let hit = HandleHit {
        corner: Corner::Br,
        kind: HandleKind::Resize,
    };
    let mut session = store
        .begin_transform(hit, Point::new(200.0, 120.0))
        .unwrap();
    session.update(Point::new(100.0, 100.0), TransformModifiers::default());
    store.commit_transform(session);

    let item = store.doc().item(&id).unwrap();
    assert_eq!((item.x, item.y, item.w, item.h), (0.0, 0.0, 100.0, 100.0));

    // past the fixed corner the size floors at the minimum
    let mut session = store
        .begin_transform(hit, Point::new(100.0, 100.0))
        .unwrap();
    session.update(Point::new(-50.0, -50.0), TransformModifiers::default());
    store.commit_transform(session);
    let item = store.doc().item(&id).unwrap();
    assert_eq!((item.x, item.y, item.w, item.h), (0.0, 0.0, 24.0, 24.0));
}

#[test]
fn test_undo_delete_restores_ids_and_order() {
    let mut store = store();
    let a = store.add_item_at_world(ItemType::Bed, Point::new(50.0, 50.0));
    let b = store.add_item_at_world(ItemType::Tree, Point::new(300.0, 300.0));
    let before: Vec<_> = store.doc().items.by_order().into_iter().cloned().collect();

    store.set_selection([a, b]);
    assert_eq!(store.delete_selected(), 2);
    assert!(store.undo());

    let after: Vec<_> = store.doc().items.by_order().into_iter().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn test_snapped_drag_commit() {
    let mut config = EditorConfig::default();
    config.grid.snap_enabled = true;
    config.grid.step = 20.0;
    let mut store = WorkspaceStore::seeded(&config, Arc::new(EventBus::new()));
    // bed top-left at the origin
    let id = store.add_item_at_world(ItemType::Bed, Point::new(60.0, 40.0));

    let mut session = store.begin_move(Point::ZERO).unwrap();
    session.update(Point::new(107.0, 193.0), TransformModifiers::default());
    store.commit_transform(session);

    let item = store.doc().item(&id).unwrap();
    assert_eq!((item.x, item.y), (100.0, 200.0));
}

#[test]
fn test_keyboard_actions_drive_store() {
    let mut store = store();
    let id = store.add_item_at_world(ItemType::Bed, Point::new(60.0, 40.0));

    let copy = map_key(&KeyEvent::down(Key::Char('c'), Modifiers { ctrl: true, ..Modifiers::default() })).unwrap();
    assert!(store.apply_action(copy, Point::ZERO));
    let paste = map_key(&KeyEvent::down(Key::Char('v'), Modifiers { ctrl: true, ..Modifiers::default() })).unwrap();
    assert!(store.apply_action(paste, Point::new(500.0, 500.0)));
    assert_eq!(store.doc().items.len(), 2);

    let nudge = map_key(&KeyEvent::down(Key::ArrowRight, Modifiers { shift: true, ..Modifiers::default() })).unwrap();
    store.set_selection([id.clone()]);
    assert!(store.apply_action(nudge, Point::ZERO));
    assert_eq!(store.doc().item(&id).unwrap().x, 10.0);

    let escape = map_key(&KeyEvent::down(Key::Escape, Modifiers::default())).unwrap();
    assert!(store.apply_action(escape, Point::ZERO));
    assert!(!store.apply_action(escape, Point::ZERO));
}

#[test]
fn test_observers_see_commits_and_selection() {
    let bus = Arc::new(EventBus::new());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Document, EventCategory::Selection]),
        move |event| sink.lock().push(event.clone()),
    );

    let mut store = WorkspaceStore::seeded(&EditorConfig::default(), bus);
    store.add_item_at_world(ItemType::Zone, Point::ZERO);
    store.undo();

    let seen = seen.lock();
    assert!(matches!(seen[0], StoreEvent::DocumentCommitted { .. }));
    assert!(seen
        .iter()
        .any(|e| matches!(e, StoreEvent::SelectionChanged { count: 1 })));
    assert!(matches!(
        seen.last(),
        Some(StoreEvent::HistoryMoved {
            undo_depth: 0,
            redo_depth: 1,
            ..
        })
    ));
}
