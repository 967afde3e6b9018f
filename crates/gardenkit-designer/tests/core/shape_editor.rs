use std::sync::Arc;

use gardenkit_core::{EventBus, Point};
use gardenkit_designer::model::{BezierHandle, Corner, CornerRadii, ItemType, ShapeMode, ShapePath};
use gardenkit_designer::shape_editor::ShapeTarget;
use gardenkit_designer::WorkspaceStore;
use gardenkit_settings::EditorConfig;
use proptest::prelude::*;

fn store_with_bed() -> (WorkspaceStore, String) {
    let mut store = WorkspaceStore::seeded(&EditorConfig::default(), Arc::new(EventBus::new()));
    // bed 120x80 with its top-left at the origin
    let id = store.add_item_at_world(ItemType::Bed, Point::new(60.0, 40.0));
    (store, id)
}

#[test]
fn test_polygon_edit_commits_once() {
    let (mut store, id) = store_with_bed();
    let depth = store.undo_depth();

    let mut session = store.begin_shape_edit(&id).unwrap();
    session.set_mode(ShapeMode::Polygon);
    let target = session.hit(Point::new(120.0, 80.0), 1.0, 8.0).unwrap();
    assert_eq!(target, ShapeTarget::Point(2));
    assert!(session.begin_drag(target));
    assert!(!session.begin_drag(ShapeTarget::Point(0)));
    session.drag_to(Point::new(60.0, 40.0));
    session.end_drag();

    assert!(store.commit_shape_edit(session).unwrap());
    assert_eq!(store.undo_depth(), depth + 1);
    match store.item_shape(&id) {
        Some(ShapePath::Polygon(p)) => assert_eq!(p.points[2], Point::new(0.5, 0.5)),
        other => panic!("expected polygon, got {other:?}"),
    }
}

#[test]
fn test_unchanged_session_writes_nothing() {
    let (mut store, id) = store_with_bed();
    let depth = store.undo_depth();
    let session = store.begin_shape_edit(&id).unwrap();
    assert!(!store.commit_shape_edit(session).unwrap());
    assert_eq!(store.undo_depth(), depth);
}

#[test]
fn test_corner_radius_double_click_toggles_uniform() {
    let (mut store, id) = store_with_bed();
    let mut session = store.begin_shape_edit(&id).unwrap();
    session.set_mode(ShapeMode::CornerRadii);
    session.double_click(ShapeTarget::CornerRadius(Corner::Tl));
    assert!(matches!(
        session.draft(),
        Some(ShapePath::CornerRadii(CornerRadii::PerCorner { .. }))
    ));
    session.double_click(ShapeTarget::CornerRadius(Corner::Tl));
    assert!(matches!(
        session.draft(),
        Some(ShapePath::CornerRadii(CornerRadii::Uniform { .. }))
    ));
}

#[test]
fn test_bezier_markers_include_handles() {
    let (mut store, id) = store_with_bed();
    let mut session = store.begin_shape_edit(&id).unwrap();
    session.set_mode(ShapeMode::Bezier);
    let anchors = session
        .markers(1.0, 8.0)
        .iter()
        .filter(|m| matches!(m.target, ShapeTarget::Bezier(_, BezierHandle::Anchor)))
        .count();
    assert!(anchors >= 3);
}

#[test]
fn test_locked_item_cannot_be_shape_edited() {
    let (mut store, id) = store_with_bed();
    store.toggle_lock_selected();
    assert!(store.begin_shape_edit(&id).is_none());
}

#[test]
fn test_marker_size_is_screen_constant() {
    let (mut store, id) = store_with_bed();
    let mut session = store.begin_shape_edit(&id).unwrap();
    session.set_mode(ShapeMode::Polygon);
    let near = session.markers(2.0, 8.0);
    let far = session.markers(0.5, 8.0);
    assert_eq!(near[0].size, 4.0);
    assert_eq!(far[0].size, 16.0);
}

proptest! {
    #[test]
    fn prop_shape_modes_are_exclusive(modes in prop::collection::vec(0usize..5, 1..20)) {
        let all = [
            ShapeMode::Rect,
            ShapeMode::CornerRadii,
            ShapeMode::Polygon,
            ShapeMode::Curvature,
            ShapeMode::Bezier,
        ];
        let (mut store, id) = store_with_bed();
        let mut last = ShapeMode::Rect;
        for m in modes {
            last = all[m];
            store.set_shape_mode(&id, last).unwrap();
        }
        match store.item_shape(&id) {
            None => prop_assert_eq!(last, ShapeMode::Rect),
            Some(shape) => prop_assert_eq!(shape.mode(), last),
        }
    }
}
