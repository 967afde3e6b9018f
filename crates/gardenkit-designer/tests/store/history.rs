use std::collections::HashSet;
use std::sync::Arc;

use gardenkit_core::{EventBus, Point};
use gardenkit_designer::model::{ItemType, LayoutDoc};
use gardenkit_designer::WorkspaceStore;
use gardenkit_settings::EditorConfig;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(usize, f64, f64),
    DeleteFirst,
    Move(f64, f64),
    Duplicate,
    BringToFront,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..6, -500.0f64..500.0, -500.0f64..500.0).prop_map(|(t, x, y)| Op::Add(t, x, y)),
        Just(Op::DeleteFirst),
        (-50.0f64..50.0, -50.0f64..50.0).prop_map(|(dx, dy)| Op::Move(dx, dy)),
        Just(Op::Duplicate),
        Just(Op::BringToFront),
    ]
}

fn apply(store: &mut WorkspaceStore, op: &Op) {
    match *op {
        Op::Add(t, x, y) => {
            store.add_item_at_world(ItemType::ALL[t], Point::new(x, y));
        }
        Op::DeleteFirst => {
            if let Some(first) = store.doc().items.by_order().first().map(|i| i.id.clone()) {
                store.set_selection([first]);
                store.delete_selected();
            }
        }
        Op::Move(dx, dy) => store.move_selected(dx, dy),
        Op::Duplicate => {
            store.duplicate_selected();
        }
        Op::BringToFront => store.bring_to_front(),
    }
}

fn store() -> WorkspaceStore {
    WorkspaceStore::seeded(&EditorConfig::default(), Arc::new(EventBus::new()))
}

#[test]
fn test_history_is_bounded() {
    let mut config = EditorConfig::default();
    config.history_limit = 5;
    let mut store = WorkspaceStore::seeded(&config, Arc::new(EventBus::new()));
    for i in 0..12 {
        store.add_item_at_world(ItemType::Zone, Point::new(i as f64 * 10.0, 0.0));
    }
    assert_eq!(store.undo_depth(), 5);
    while store.undo() {}
    assert_eq!(store.doc().items.len(), 7);
}

#[test]
fn test_new_commit_clears_redo() {
    let mut store = store();
    store.add_item_at_world(ItemType::Bed, Point::ZERO);
    store.undo();
    assert!(store.can_redo());
    store.add_item_at_world(ItemType::Tree, Point::ZERO);
    assert!(!store.can_redo());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_undo_redo_roundtrip(ops in prop::collection::vec(op(), 1..30)) {
        let mut store = store();
        let initial: LayoutDoc = store.doc().clone();
        for op in &ops {
            apply(&mut store, op);
        }
        let last = store.doc().clone();
        let depth = store.undo_depth();

        for _ in 0..depth {
            prop_assert!(store.undo());
        }
        prop_assert_eq!(store.doc(), &initial);
        prop_assert!(!store.undo());

        for _ in 0..depth {
            prop_assert!(store.redo());
        }
        prop_assert_eq!(store.doc(), &last);
    }

    #[test]
    fn prop_codes_stay_unique(ops in prop::collection::vec(op(), 1..40)) {
        let mut store = store();
        for op in &ops {
            apply(&mut store, op);
            let codes: Vec<&str> = store.doc().codes().collect();
            let unique: HashSet<&str> = codes.iter().copied().collect();
            prop_assert_eq!(codes.len(), unique.len());
        }
    }
}
