use std::sync::Arc;

use gardenkit_core::{EventBus, Point};
use gardenkit_designer::model::{ItemType, PolygonPath, ShapePath};
use gardenkit_designer::render_policy::ViewState;
use gardenkit_designer::renderer::{draw_list, outline_bounds, outline_contains};
use gardenkit_designer::transform::TransformModifiers;
use gardenkit_designer::{ItemPatch, WorkspaceStore};
use gardenkit_settings::EditorConfig;

fn store() -> WorkspaceStore {
    WorkspaceStore::seeded(&EditorConfig::default(), Arc::new(EventBus::new()))
}

#[test]
fn test_draw_list_follows_paint_order() {
    let mut store = store();
    let a = store.add_item_at_world(ItemType::Zone, Point::new(200.0, 200.0));
    let b = store.add_item_at_world(ItemType::Bed, Point::new(220.0, 220.0));
    store.set_selection([b.clone()]);
    store.send_to_back();

    let list = draw_list(store.doc(), store.selection(), &[], &ViewState::new(1.0));
    let ids: Vec<_> = list.iter().map(|d| d.id.clone()).collect();
    assert_eq!(ids, vec![b.clone(), a]);
    assert!(list[0].selected);
    assert!(!list[1].selected);
}

#[test]
fn test_draw_list_uses_transform_preview() {
    let mut store = store();
    let id = store.add_item_at_world(ItemType::Bed, Point::new(60.0, 40.0));
    let mut session = store.begin_move(Point::new(60.0, 40.0)).unwrap();
    let preview = session
        .update(Point::new(160.0, 40.0), TransformModifiers::default())
        .to_vec();

    let view = ViewState {
        active: vec![id.clone()],
        ..ViewState::new(1.0)
    };
    let list = draw_list(store.doc(), store.selection(), &preview, &view);
    let bounds = lyon::algorithms::aabb::bounding_box(list[0].outline.iter());
    assert!((bounds.min.x - 100.0).abs() < 1e-3);
    assert!(!list[0].cached);

    // the document itself is untouched until commit
    assert_eq!(store.doc().item(&id).unwrap().x, 0.0);
    store.commit_transform(session);
    assert_eq!(store.doc().item(&id).unwrap().x, 100.0);
}

#[test]
fn test_polygon_hit_uses_silhouette() {
    let mut store = store();
    let id = store.add_item_at_world(ItemType::Zone, Point::new(120.0, 80.0));
    let triangle = PolygonPath::new(
        vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
        true,
    );
    store
        .update_item(
            &id,
            ItemPatch {
                shape: Some(Some(ShapePath::Polygon(triangle))),
                ..ItemPatch::default()
            },
        )
        .unwrap();

    let item = store.doc().item(&id).unwrap();
    // zone is 240x160 at the origin
    assert!(outline_contains(item, Point::new(20.0, 20.0), 0.1));
    assert!(!outline_contains(item, Point::new(220.0, 140.0), 0.1));
    assert!(item.contains_world(Point::new(220.0, 140.0)));

    let bounds = outline_bounds(item);
    assert!((bounds.w - 240.0).abs() < 1e-3);
}
