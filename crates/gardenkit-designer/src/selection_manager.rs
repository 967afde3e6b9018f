use gardenkit_core::{bounds_of_rects, Point, Rect};

use crate::model::{ItemId, LayoutDoc, StudioItem};

/// Manages item selection state and selection operations.
///
/// `SelectionManager` is responsible for:
/// - Point-based selection (clicking on items)
/// - Rectangle-based selection (marquee drag)
/// - Multi-select toggling (Shift+click)
/// - Dropping ids that no longer resolve after undo, delete, or a layout switch
///
/// # Selection Model
///
/// Selection holds item ids only. Geometry is always resolved through the
/// document at the time of use, so the manager never holds stale item data.
/// The first selected id is the "primary" selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    selected: Vec<ItemId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use gardenkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected ids in selection order.
    pub fn selected_ids(&self) -> &[ItemId] {
        &self.selected
    }

    /// Returns the primary selected id.
    pub fn primary(&self) -> Option<&ItemId> {
        self.selected.first()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Replaces the selection with `ids`, dropping duplicates.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.selected.clear();
        for id in ids {
            if !self.is_selected(&id) {
                self.selected.push(id);
            }
        }
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Selects every item in paint order.
    pub fn select_all(&mut self, doc: &LayoutDoc) {
        self.set(doc.items.by_order().into_iter().map(|i| i.id.clone()));
    }

    /// Selects the topmost item at `point`.
    ///
    /// # Arguments
    ///
    /// * `doc` - The document to hit-test against
    /// * `point` - World point to test
    /// * `multi` - Shift+click behaviour: toggle the hit item and keep the rest
    ///
    /// # Returns
    ///
    /// The id of the item that was hit, if any. A plain click on empty
    /// canvas clears the selection.
    pub fn select_at(&mut self, doc: &LayoutDoc, point: Point, multi: bool) -> Option<ItemId> {
        let hit = hit_test(doc, point).map(|item| item.id.clone());
        match (&hit, multi) {
            (Some(id), true) => self.toggle(id),
            (Some(id), false) => {
                // Clicking an already selected item keeps the group for a drag.
                if !self.is_selected(id) {
                    self.set([id.clone()]);
                }
            }
            (None, false) => self.deselect_all(),
            (None, true) => {}
        }
        hit
    }

    /// Toggles one id.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.to_string());
        }
    }

    /// Marquee selection: items whose rotated bounds intersect `rect`.
    ///
    /// # Arguments
    ///
    /// * `multi` - Adds to the current selection instead of replacing it
    pub fn select_in_rect(&mut self, doc: &LayoutDoc, rect: Rect, multi: bool) {
        let hits: Vec<ItemId> = doc
            .items
            .by_order()
            .into_iter()
            .filter(|item| item.world_bounds().intersects(&rect))
            .map(|item| item.id.clone())
            .collect();
        if multi {
            for id in hits {
                if !self.is_selected(&id) {
                    self.selected.push(id);
                }
            }
        } else {
            self.set(hits);
        }
    }

    /// Drops ids that no longer exist in `doc`. Returns true if anything changed.
    pub fn prune(&mut self, doc: &LayoutDoc) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| doc.items.contains(id));
        before != self.selected.len()
    }

    /// Resolves the selection against `doc`, in selection order.
    pub fn items<'a>(&self, doc: &'a LayoutDoc) -> Vec<&'a StudioItem> {
        self.selected.iter().filter_map(|id| doc.items.get(id)).collect()
    }

    /// Union of the selected items' rotated bounds.
    pub fn bounds(&self, doc: &LayoutDoc) -> Option<Rect> {
        let rects: Vec<Rect> = self.items(doc).iter().map(|i| i.world_bounds()).collect();
        bounds_of_rects(rects.iter())
    }
}

/// Topmost item (highest `order`) whose rotated box contains `point`.
pub fn hit_test(doc: &LayoutDoc, point: Point) -> Option<&StudioItem> {
    doc.items
        .by_order()
        .into_iter()
        .rev()
        .find(|item| item.contains_world(point))
}
