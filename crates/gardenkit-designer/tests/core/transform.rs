use std::sync::Arc;

use gardenkit_core::{EventBus, Point};
use gardenkit_designer::model::{Corner, ItemType, StudioItem};
use gardenkit_designer::transform::{
    resize_single, HandleGeometry, HandleHit, HandleKind, HandleSet, TransformModifiers,
    TransformSession,
};
use gardenkit_designer::{FrameThrottle, ItemPatch, WorkspaceStore};
use gardenkit_settings::EditorConfig;
use proptest::prelude::*;

fn item(item_type: ItemType, x: f64, y: f64, w: f64, h: f64, r: f64) -> StudioItem {
    let mut item = StudioItem::new("a".into(), item_type, Point::ZERO, 1);
    item.x = x;
    item.y = y;
    item.w = w;
    item.h = h;
    item.r = r;
    item
}

#[test]
fn test_handle_hit_rings() {
    let bed = item(ItemType::Bed, 0.0, 0.0, 200.0, 120.0, 0.0);
    let set = HandleSet::for_items(&[&bed]).unwrap();
    let geometry = HandleGeometry::default();

    let hit = set.hit(Point::new(203.0, 123.0), 1.0, &geometry).unwrap();
    assert_eq!(hit.corner, Corner::Br);
    assert_eq!(hit.kind, HandleKind::Resize);

    let hit = set.hit(Point::new(212.0, 120.0), 1.0, &geometry).unwrap();
    assert_eq!(hit.kind, HandleKind::Rotate);

    assert!(set.hit(Point::new(100.0, 60.0), 1.0, &geometry).is_none());
}

#[test]
fn test_tree_has_no_rotate_ring() {
    let tree = item(ItemType::Tree, 0.0, 0.0, 80.0, 80.0, 0.0);
    let set = HandleSet::for_items(&[&tree]).unwrap();
    assert!(set
        .hit(Point::new(92.0, 80.0), 1.0, &HandleGeometry::default())
        .is_none());
}

#[test]
fn test_rotate_snaps_to_increment() {
    let bed = item(ItemType::Bed, 0.0, 0.0, 100.0, 100.0, 0.0);
    let hit = HandleHit {
        corner: Corner::Tr,
        kind: HandleKind::Rotate,
    };
    // pointer due east of the center
    let mut session =
        TransformSession::begin(&[&bed], hit, Point::new(150.0, 50.0), &HandleGeometry::default())
            .unwrap();
    let preview = session.update(
        Point::new(50.0 + 100.0 * 40f64.to_radians().cos(), 50.0 + 100.0 * 40f64.to_radians().sin()),
        TransformModifiers { snap_rotation: true },
    );
    assert!((preview[0].r - 45.0).abs() < 1e-9);
}

#[test]
fn test_locked_selection_has_no_session() {
    let mut bed = item(ItemType::Bed, 0.0, 0.0, 100.0, 100.0, 0.0);
    bed.meta.locked = true;
    assert!(HandleSet::for_items(&[&bed]).is_none());
    assert!(TransformSession::begin_move(&[&bed], Point::ZERO).is_none());
}

fn store_with_bed(snap: bool, x: f64, y: f64, w: f64, h: f64) -> (WorkspaceStore, String) {
    let mut config = EditorConfig::default();
    config.grid.snap_enabled = snap;
    config.grid.step = 20.0;
    let mut store = WorkspaceStore::seeded(&config, Arc::new(EventBus::new()));
    let id = store.add_item_at_world(ItemType::Bed, Point::ZERO);
    let patch = ItemPatch {
        x: Some(x),
        y: Some(y),
        w: Some(w),
        h: Some(h),
        ..ItemPatch::default()
    };
    store.update_item(&id, patch).unwrap();
    (store, id)
}

/// Drags the rotate ring of the selected item from `from_deg` to `to_deg`
/// around its center and commits.
fn rotate_through_store(store: &mut WorkspaceStore, id: &str, from_deg: f64, to_deg: f64) {
    let center = store.doc().item(id).unwrap().center();
    let at = |deg: f64| {
        let rad = deg.to_radians();
        Point::new(center.x + 100.0 * rad.cos(), center.y + 100.0 * rad.sin())
    };
    let hit = HandleHit {
        corner: Corner::Br,
        kind: HandleKind::Rotate,
    };
    let mut session = store.begin_transform(hit, at(from_deg)).unwrap();
    session.update(at(to_deg), TransformModifiers::default());
    store.commit_transform(session);
}

#[test]
fn test_throttled_drag_applies_newest_pointer() {
    let (mut store, id) = store_with_bed(false, 0.0, 0.0, 120.0, 80.0);
    let mut frames = FrameThrottle::new();

    let mut session = store.begin_move(Point::ZERO).unwrap();
    assert!(frames.push(Point::new(10.0, 0.0)));
    assert!(!frames.push(Point::new(20.0, 0.0)));
    assert!(!frames.push(Point::new(30.0, 5.0)));
    // a pointer-down while the drag runs starts nothing
    assert!(store.begin_move(Point::ZERO).is_none());

    let pointer = frames.take().unwrap();
    let preview = session.update(pointer, TransformModifiers::default());
    assert_eq!((preview[0].x, preview[0].y), (30.0, 5.0));
    assert_eq!(frames.dropped(), 2);
    assert_eq!(store.doc().item(&id).unwrap().x, 0.0);

    store.commit_transform(session);
    assert_eq!(store.doc().item(&id).unwrap().x, 30.0);
    assert!(store.active_drag().is_none());
}

#[test]
fn test_escape_during_drag_discards_preview() {
    let (mut store, id) = store_with_bed(false, 0.0, 0.0, 120.0, 80.0);
    let before = store.doc().clone();
    let depth = store.undo_depth();
    let mut frames = FrameThrottle::new();

    let hit = HandleHit {
        corner: Corner::Br,
        kind: HandleKind::Resize,
    };
    let mut session = store.begin_transform(hit, Point::new(120.0, 80.0)).unwrap();
    frames.push(Point::new(300.0, 300.0));
    if let Some(pointer) = frames.take() {
        session.update(pointer, TransformModifiers::default());
    }
    frames.push(Point::new(310.0, 310.0));

    frames.clear();
    let restored = store.cancel_transform(session);
    assert_eq!(restored[0].w, 120.0);
    assert_eq!(store.doc(), &before);
    assert_eq!(store.undo_depth(), depth);
    assert!(store.native_move_enabled(&id));
    assert!(store.begin_move(Point::ZERO).is_some());
}

#[test]
fn test_rotate_off_grid_item_with_snap_on() {
    let (mut store, id) = store_with_bed(true, 13.0, 7.0, 130.0, 90.0);
    rotate_through_store(&mut store, &id, 0.0, 30.0);
    rotate_through_store(&mut store, &id, 30.0, 0.0);
    let item = store.doc().item(&id).unwrap();
    assert_eq!((item.x, item.y, item.w, item.h), (13.0, 7.0, 130.0, 90.0));
    assert!(item.r.min(360.0 - item.r) < 1e-6);
}

proptest! {
    #[test]
    fn prop_rotate_there_and_back_keeps_geometry(x in -300.0f64..300.0, y in -300.0f64..300.0,
                                                 w in 24.0f64..300.0, h in 24.0f64..300.0,
                                                 theta in -170.0f64..170.0, snap in any::<bool>()) {
        let (mut store, id) = store_with_bed(snap, x, y, w, h);
        rotate_through_store(&mut store, &id, 0.0, theta);
        rotate_through_store(&mut store, &id, theta, 0.0);

        let item = store.doc().item(&id).unwrap();
        prop_assert_eq!((item.x, item.y, item.w, item.h), (x, y, w, h));
        let r = item.r.rem_euclid(360.0);
        prop_assert!(r.min(360.0 - r) < 1e-6, "rotation left at {}", item.r);
    }

    #[test]
    fn prop_resize_keeps_opposite_corner(r in 0.0f64..360.0,
                                         px in -400.0f64..400.0, py in -400.0f64..400.0,
                                         corner in 0usize..4) {
        let orig = item(ItemType::Bed, 10.0, 20.0, 200.0, 120.0, r);
        let corner = Corner::ALL[corner];
        let fixed = orig.world_corners()[corner.opposite().index()];
        let resized = resize_single(&orig, corner, fixed, Point::new(px, py));
        let after = resized.world_corners()[corner.opposite().index()];
        prop_assert!(after.distance_to(&fixed) < 1e-6);
        prop_assert!(resized.w >= 24.0 && resized.h >= 24.0);
    }

    #[test]
    fn prop_local_world_roundtrip(r in -720.0f64..720.0, lx in 0.0f64..200.0, ly in 0.0f64..120.0) {
        let bed = item(ItemType::Bed, 30.0, -15.0, 200.0, 120.0, r);
        let local = Point::new(lx, ly);
        let back = bed.world_to_local(bed.local_to_world(local));
        prop_assert!(back.distance_to(&local) < 1e-6);
    }
}
