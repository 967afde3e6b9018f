use gardenkit_core::{bounds_of_rects, Point, Rect};

use crate::codes::CodeAllocator;
use crate::model::{new_id, LayoutDoc, StudioItem};

/// Copied items, independent of any layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    items: Vec<StudioItem>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the clipboard with deep copies of `items`, kept in paint order.
    pub fn copy<'a>(&mut self, items: impl IntoIterator<Item = &'a StudioItem>) {
        let mut items: Vec<StudioItem> = items.into_iter().cloned().collect();
        items.sort_by_key(|i| i.order);
        self.items = items;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[StudioItem] {
        &self.items
    }

    /// Produces fresh copies for `doc`, centered as a group on `anchor`.
    ///
    /// Copies get new ids, stack above everything in `doc` in their original
    /// relative order, and keep their codes unless that would collide.
    pub fn paste(&self, doc: &LayoutDoc, anchor: Point) -> Vec<StudioItem> {
        let rects: Vec<Rect> = self.items.iter().map(|i| i.world_bounds()).collect();
        let Some(bounds) = bounds_of_rects(rects.iter()) else {
            return Vec::new();
        };
        let offset = if anchor.is_finite() {
            anchor - bounds.center()
        } else {
            Point::ZERO
        };
        let base = doc.next_order();
        let mut codes = CodeAllocator::for_doc(doc);

        self.items
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let mut item = source.clone();
                item.id = new_id();
                item.x += offset.x;
                item.y += offset.y;
                item.order = base + index as i64;
                item.meta.code = codes.keep_or_next(item.item_type, source.meta.code.as_deref());
                item
            })
            .collect()
    }
}
