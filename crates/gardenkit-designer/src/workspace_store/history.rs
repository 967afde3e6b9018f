//! Undo/redo for the active layout.

use gardenkit_core::StoreEvent;

use super::WorkspaceStore;

impl WorkspaceStore {
    /// Restores the document before the last commit.
    pub fn undo(&mut self) -> bool {
        let current = std::mem::take(&mut self.doc);
        match self.history.undo(current) {
            Ok(previous) => {
                self.doc = previous;
                self.history_moved("undo");
                true
            }
            Err(current) => {
                self.doc = current;
                false
            }
        }
    }

    /// Re-applies the last undone commit.
    pub fn redo(&mut self) -> bool {
        let current = std::mem::take(&mut self.doc);
        match self.history.redo(current) {
            Ok(next) => {
                self.doc = next;
                self.history_moved("redo");
                true
            }
            Err(current) => {
                self.doc = current;
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    fn history_moved(&mut self, direction: &str) {
        self.touch_active_layout();
        tracing::debug!(
            "{} on layout {} (undo {}, redo {})",
            direction,
            self.data.active_layout_id,
            self.history.undo_depth(),
            self.history.redo_depth()
        );
        self.prune_selection();
        self.emit(StoreEvent::HistoryMoved {
            layout_id: self.data.active_layout_id.clone(),
            undo_depth: self.history.undo_depth(),
            redo_depth: self.history.redo_depth(),
        });
        self.settle();
    }
}
