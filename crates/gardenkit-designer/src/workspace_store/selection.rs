//! Selection operations on the active document.

use gardenkit_core::{Point, Rect, StoreEvent};

use super::WorkspaceStore;
use crate::model::{ItemId, StudioItem};
use crate::selection_manager::SelectionManager;
use crate::transform::HandleSet;

impl WorkspaceStore {
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selection.selected_ids().to_vec()
    }

    pub fn selected_items(&self) -> Vec<&StudioItem> {
        self.selection.items(&self.doc)
    }

    /// Handles for the current selection, if it can be transformed.
    pub fn handle_set(&self) -> Option<HandleSet> {
        HandleSet::for_items(&self.selection.items(&self.doc))
    }

    /// Click selection. Returns the hit item, if any.
    pub fn select_at(&mut self, point: Point, multi: bool) -> Option<ItemId> {
        let before = self.selection.clone();
        let hit = self.selection.select_at(&self.doc, point, multi);
        self.selection_changed(&before);
        hit
    }

    pub fn select_in_rect(&mut self, rect: Rect, multi: bool) {
        let before = self.selection.clone();
        self.selection.select_in_rect(&self.doc, rect, multi);
        self.selection_changed(&before);
    }

    pub fn select_all(&mut self) {
        let before = self.selection.clone();
        self.selection.select_all(&self.doc);
        self.selection_changed(&before);
    }

    pub fn deselect_all(&mut self) {
        let before = self.selection.clone();
        self.selection.deselect_all();
        self.selection_changed(&before);
    }

    /// Replaces the selection. Ids not in the document are dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        let before = self.selection.clone();
        let doc = &self.doc;
        self.selection
            .set(ids.into_iter().filter(|id| doc.items.contains(id)));
        self.selection_changed(&before);
    }

    /// Drops selected ids that no longer resolve.
    pub(crate) fn prune_selection(&mut self) {
        if self.selection.prune(&self.doc) {
            self.emit(StoreEvent::SelectionChanged {
                count: self.selection.len(),
            });
        }
    }

    fn selection_changed(&self, before: &SelectionManager) {
        if *before != self.selection {
            self.emit(StoreEvent::SelectionChanged {
                count: self.selection.len(),
            });
        }
    }
}
