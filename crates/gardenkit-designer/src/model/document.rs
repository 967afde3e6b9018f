use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gardenkit_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use gardenkit_core::{bounds_of_rects, Rect};

use super::{ItemId, StudioItem};

/// Plot dimensions in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasSize {
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Flat id-keyed item storage.
///
/// Serialized as a JSON array sorted by paint order so stored documents
/// stay stable across saves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<StudioItem>", into = "Vec<StudioItem>")]
pub struct ItemArena {
    items: HashMap<ItemId, StudioItem>,
}

impl ItemArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StudioItem> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut StudioItem> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Inserts or replaces by id.
    pub fn insert(&mut self, item: StudioItem) -> Option<StudioItem> {
        self.items.insert(item.id.clone(), item)
    }

    pub fn remove(&mut self, id: &str) -> Option<StudioItem> {
        self.items.remove(id)
    }

    /// Unordered iteration.
    pub fn iter(&self) -> impl Iterator<Item = &StudioItem> {
        self.items.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StudioItem> {
        self.items.values_mut()
    }

    /// Items bottom to top; ties broken by id.
    pub fn by_order(&self) -> Vec<&StudioItem> {
        let mut items: Vec<&StudioItem> = self.items.values().collect();
        items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        items
    }

    pub fn max_order(&self) -> Option<i64> {
        self.items.values().map(|i| i.order).max()
    }

    pub fn min_order(&self) -> Option<i64> {
        self.items.values().map(|i| i.order).min()
    }
}

impl From<Vec<StudioItem>> for ItemArena {
    fn from(items: Vec<StudioItem>) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }
}

impl From<ItemArena> for Vec<StudioItem> {
    fn from(arena: ItemArena) -> Self {
        let mut items: Vec<StudioItem> = arena.items.into_values().collect();
        items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        items
    }
}

/// One layout's document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutDoc {
    #[serde(default)]
    pub canvas: CanvasSize,
    #[serde(default)]
    pub items: ItemArena,
}

impl LayoutDoc {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            items: ItemArena::new(),
        }
    }

    pub fn item(&self, id: &str) -> Option<&StudioItem> {
        self.items.get(id)
    }

    /// Order for a newly added item: one above the current top.
    pub fn next_order(&self) -> i64 {
        self.items.max_order().map_or(1, |o| o + 1)
    }

    /// Union of the rotated bounds of every item.
    pub fn content_bounds(&self) -> Option<Rect> {
        let rects: Vec<Rect> = self.items.iter().map(|i| i.world_bounds()).collect();
        bounds_of_rects(rects.iter())
    }

    /// Item codes in use.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|i| i.meta.code.as_deref())
    }
}
