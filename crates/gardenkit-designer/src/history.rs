//! Snapshot undo/redo history for one layout document.

use std::collections::VecDeque;

use gardenkit_core::constants::HISTORY_LIMIT;

use crate::model::LayoutDoc;

/// Bounded past/future stacks of whole-document snapshots.
///
/// Every commit records the pre-change document; undo swaps the current
/// document with the newest past snapshot and parks the current one in
/// `future`. Recording clears `future`.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoRedoManager {
    past: VecDeque<LayoutDoc>,
    future: Vec<LayoutDoc>,
    limit: usize,
}

impl UndoRedoManager {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Records the document as it was before a change.
    pub fn record(&mut self, before: LayoutDoc) {
        self.past.push_back(before);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Returns the document to restore, taking ownership of `current`.
    pub fn undo(&mut self, current: LayoutDoc) -> Result<LayoutDoc, LayoutDoc> {
        match self.past.pop_back() {
            Some(previous) => {
                self.future.push(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Returns the document to re-apply, taking ownership of `current`.
    pub fn redo(&mut self, current: LayoutDoc) -> Result<LayoutDoc, LayoutDoc> {
        match self.future.pop() {
            Some(next) => {
                self.past.push_back(current);
                Ok(next)
            }
            None => Err(current),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}
