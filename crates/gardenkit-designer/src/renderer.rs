//! World-space outlines and the paint-ordered draw list.
//!
//! Items render in their local `[0,w]×[0,h]` box; this module places that
//! outline in the world by translating to the item's top-left and rotating
//! about its center.

use lyon::math::{vector, Angle, Transform};
use lyon::path::{FillRule, Path};

use gardenkit_core::{Point, Rect};

use crate::model::{outline_for, sample_path, ItemId, ItemStyle, LayoutDoc, StudioItem};
use crate::render_policy::{should_cache, ViewState};
use crate::selection_manager::SelectionManager;

/// Local-to-world transform of an item.
pub fn world_transform(item: &StudioItem) -> Transform {
    let center = item.center();
    let mut transform = Transform::translation(item.x as f32, item.y as f32);
    if item.r.abs() > 1e-9 {
        transform = transform
            .then_translate(vector(-center.x as f32, -center.y as f32))
            .then_rotate(Angle::degrees(item.r as f32))
            .then_translate(vector(center.x as f32, center.y as f32));
    }
    transform
}

/// Item outline in its local box.
pub fn local_outline(item: &StudioItem) -> Path {
    outline_for(
        item.meta.shape.as_ref(),
        item.w,
        item.h,
        item.style.corner_radius,
    )
}

/// Item outline in world coordinates.
pub fn world_outline(item: &StudioItem) -> Path {
    local_outline(item).transformed(&world_transform(item))
}

/// Flattened world outline, one polyline per sub-path.
pub fn world_polylines(item: &StudioItem, tolerance: f32) -> Vec<Vec<Point>> {
    sample_path(&world_outline(item), tolerance)
}

/// Exact hit test against the rendered silhouette rather than the box.
pub fn outline_contains(item: &StudioItem, world: Point, tolerance: f64) -> bool {
    if !world.is_finite() {
        return false;
    }
    let local = item.world_to_local(world);
    let path = local_outline(item);
    lyon::algorithms::hit_test::hit_test_path(
        &lyon::math::point(local.x as f32, local.y as f32),
        path.iter(),
        FillRule::NonZero,
        tolerance.max(0.001) as f32,
    )
}

/// Bounds of the rendered silhouette in world space.
pub fn outline_bounds(item: &StudioItem) -> Rect {
    let bb = lyon::algorithms::aabb::bounding_box(world_outline(item).iter());
    Rect::new(
        bb.min.x as f64,
        bb.min.y as f64,
        (bb.max.x - bb.min.x) as f64,
        (bb.max.y - bb.min.y) as f64,
    )
}

/// One entry of the draw list.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub id: ItemId,
    pub order: i64,
    pub outline: Path,
    pub style: ItemStyle,
    pub label: String,
    pub selected: bool,
    pub locked: bool,
    pub cached: bool,
}

/// Items in paint order, bottom first.
///
/// `overrides` replaces committed items with live previews, so an active
/// transform draws without touching the document.
pub fn draw_list(
    doc: &LayoutDoc,
    selection: &SelectionManager,
    overrides: &[StudioItem],
    view: &ViewState,
) -> Vec<DrawItem> {
    doc.items
        .by_order()
        .into_iter()
        .map(|committed| {
            let item = overrides
                .iter()
                .find(|o| o.id == committed.id)
                .unwrap_or(committed);
            DrawItem {
                id: item.id.clone(),
                order: item.order,
                outline: world_outline(item),
                style: item.style.clone(),
                label: item.label.clone(),
                selected: selection.is_selected(&item.id),
                locked: item.is_locked(),
                cached: should_cache(item, view),
            }
        })
        .collect()
}
