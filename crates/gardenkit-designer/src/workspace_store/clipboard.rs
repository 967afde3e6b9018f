//! Copy, paste and duplicate.

use gardenkit_core::constants::DEFAULT_GRID_STEP;
use gardenkit_core::Point;

use super::WorkspaceStore;
use crate::clipboard::Clipboard;
use crate::model::ItemId;

impl WorkspaceStore {
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Copies the selection. Returns how many items were copied.
    pub fn copy_selected(&mut self) -> usize {
        let items = self.selection.items(&self.doc);
        if items.is_empty() {
            return 0;
        }
        self.clipboard.copy(items);
        self.clipboard.len()
    }

    /// Pastes the clipboard centered on `anchor` (the cursor, or the
    /// viewport center when the cursor is off-canvas) and selects the copies.
    pub fn paste_at(&mut self, anchor: Point) -> Vec<ItemId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let pasted = self.clipboard.paste(&self.doc, anchor);
        let ids: Vec<ItemId> = pasted.iter().map(|i| i.id.clone()).collect();
        self.commit("paste", |doc| {
            for item in pasted {
                doc.items.insert(item);
            }
        });
        tracing::debug!("Pasted {} items", ids.len());
        self.set_selection(ids.clone());
        ids
    }

    /// Copies the selection and pastes it one grid step down and right.
    pub fn duplicate_selected(&mut self) -> Vec<ItemId> {
        let Some(bounds) = self.selection.bounds(&self.doc) else {
            return Vec::new();
        };
        self.copy_selected();
        let anchor = bounds.center() + Point::new(DEFAULT_GRID_STEP, DEFAULT_GRID_STEP);
        self.paste_at(anchor)
    }
}
