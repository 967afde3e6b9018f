//! Pure document edits.
//!
//! Each function mutates a `LayoutDoc` in place and knows nothing about
//! history or persistence; the workspace store wraps every call in its
//! patch primitive so the pre-change snapshot is always taken first.

use gardenkit_core::{normalize_degrees, snap_to_step, Point};

use crate::codes::CodeAllocator;
use crate::model::{new_id, ItemMeta, ItemStyle, ItemType, LayoutDoc, ShapePath, StudioItem};

/// Partial update for one item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub r: Option<f64>,
    pub label: Option<String>,
    pub style: Option<ItemStyle>,
    pub meta: Option<ItemMeta>,
    /// `Some(None)` clears the shape path back to a plain box.
    pub shape: Option<Option<ShapePath>>,
}

impl ItemPatch {
    /// Patch carrying the geometry of `item`.
    pub fn geometry_of(item: &StudioItem) -> Self {
        Self {
            x: Some(item.x),
            y: Some(item.y),
            w: Some(item.w),
            h: Some(item.h),
            r: Some(item.r),
            ..Self::default()
        }
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Places a new item of default size centered at `at`.
///
/// The item stacks above everything else and, for beds and trees, gets the
/// next free sequential code.
pub fn add_item(doc: &mut LayoutDoc, item_type: ItemType, at: Point) -> StudioItem {
    let at = if at.is_finite() { at } else { doc.canvas.rect().center() };
    let mut item = StudioItem::new(new_id(), item_type, at, doc.next_order());
    item.meta.code = CodeAllocator::for_doc(doc).next(item_type);
    doc.items.insert(item.clone());
    item
}

/// Applies `patch` to item `id`. Returns false if the item does not exist.
///
/// Non-finite numbers are ignored; sizes are floored at the minimum.
pub fn apply_patch(doc: &mut LayoutDoc, id: &str, patch: &ItemPatch) -> bool {
    let Some(item) = doc.items.get_mut(id) else {
        return false;
    };
    let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
    if let Some(x) = finite(patch.x) {
        item.x = x;
    }
    if let Some(y) = finite(patch.y) {
        item.y = y;
    }
    if let Some(w) = finite(patch.w) {
        item.w = w;
    }
    if let Some(h) = finite(patch.h) {
        item.h = h;
    }
    if let Some(r) = finite(patch.r) {
        item.r = normalize_degrees(r);
    }
    if let Some(label) = &patch.label {
        item.label = label.clone();
    }
    if let Some(style) = &patch.style {
        item.style = style.clone();
    }
    if let Some(meta) = &patch.meta {
        // code is assigned once; meta edits cannot change it
        let code = item.meta.code.take();
        item.meta = meta.clone();
        item.meta.code = code;
    }
    if let Some(shape) = &patch.shape {
        item.meta.shape = shape.clone();
    }
    item.clamp_size();
    true
}

/// Removes items, returning those that existed.
pub fn delete_items(doc: &mut LayoutDoc, ids: &[String]) -> Vec<StudioItem> {
    ids.iter().filter_map(|id| doc.items.remove(id)).collect()
}

/// Locks all of `ids` unless every one is already locked, in which case
/// unlocks them.
pub fn toggle_lock(doc: &mut LayoutDoc, ids: &[String]) {
    let all_locked = ids
        .iter()
        .filter_map(|id| doc.items.get(id))
        .all(|i| i.meta.locked);
    for id in ids {
        if let Some(item) = doc.items.get_mut(id) {
            item.meta.locked = !all_locked;
        }
    }
}

/// Translates unlocked items, optionally snapping their new position.
pub fn move_items(doc: &mut LayoutDoc, ids: &[String], dx: f64, dy: f64, grid_step: Option<f64>) {
    if !(dx.is_finite() && dy.is_finite()) {
        return;
    }
    for id in ids {
        if let Some(item) = doc.items.get_mut(id) {
            if item.meta.locked {
                continue;
            }
            item.x += dx;
            item.y += dy;
            if let Some(step) = grid_step {
                item.x = snap_to_step(item.x, step);
                item.y = snap_to_step(item.y, step);
            }
        }
    }
}

/// Raises each item's `order` by one.
pub fn bring_forward(doc: &mut LayoutDoc, ids: &[String]) {
    shift_order(doc, ids, 1);
}

/// Lowers each item's `order` by one.
pub fn send_backward(doc: &mut LayoutDoc, ids: &[String]) {
    shift_order(doc, ids, -1);
}

fn shift_order(doc: &mut LayoutDoc, ids: &[String], delta: i64) {
    for id in ids {
        if let Some(item) = doc.items.get_mut(id) {
            item.order += delta;
        }
    }
}

/// Reassigns `max(order) + 1 + index`, keeping the group's relative order.
pub fn bring_to_front(doc: &mut LayoutDoc, ids: &[String]) {
    let Some(max) = doc.items.max_order() else {
        return;
    };
    for (index, id) in sorted_by_order(doc, ids).into_iter().enumerate() {
        if let Some(item) = doc.items.get_mut(&id) {
            item.order = max + 1 + index as i64;
        }
    }
}

/// Reassigns `min(order) - count + index`, keeping the group's relative order.
pub fn send_to_back(doc: &mut LayoutDoc, ids: &[String]) {
    let Some(min) = doc.items.min_order() else {
        return;
    };
    let ids = sorted_by_order(doc, ids);
    let count = ids.len() as i64;
    for (index, id) in ids.into_iter().enumerate() {
        if let Some(item) = doc.items.get_mut(&id) {
            item.order = min - count + index as i64;
        }
    }
}

fn sorted_by_order(doc: &LayoutDoc, ids: &[String]) -> Vec<String> {
    let mut items: Vec<&StudioItem> = ids.iter().filter_map(|id| doc.items.get(id)).collect();
    items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
    items.dedup_by(|a, b| a.id == b.id);
    items.into_iter().map(|i| i.id.clone()).collect()
}
