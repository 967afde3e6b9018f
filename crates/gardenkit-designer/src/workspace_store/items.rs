//! Item commands on the active document.

use gardenkit_core::{Point, StoreError};

use super::WorkspaceStore;
use crate::commands::{self, ItemPatch};
use crate::interaction::DragKind;
use crate::model::{ItemId, ItemMeta, ItemStyle, ItemType, ShapeMode, ShapePath, StudioItem};
use crate::shape_editor::{shape_for_mode, ShapeEditSession};
use crate::transform::{HandleHit, TransformSession};

impl WorkspaceStore {
    /// Places a new item centered at `at` and selects it.
    pub fn add_item_at_world(&mut self, item_type: ItemType, at: Point) -> ItemId {
        let item = self.commit("add_item", |doc| commands::add_item(doc, item_type, at));
        tracing::info!("Added {} {}", item_type, item.meta.code.as_deref().unwrap_or(&item.id));
        self.set_selection([item.id.clone()]);
        item.id
    }

    /// Applies one patch.
    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> Result<(), StoreError> {
        self.update_items(vec![(id.to_string(), patch)])
    }

    /// Applies several patches as one history entry.
    ///
    /// Fails without changing anything if any id is unknown.
    pub fn update_items(&mut self, patches: Vec<(ItemId, ItemPatch)>) -> Result<(), StoreError> {
        if let Some((id, _)) = patches.iter().find(|(id, _)| !self.doc.items.contains(id)) {
            return Err(StoreError::UnknownItem { id: id.clone() });
        }
        self.commit("update_items", |doc| {
            for (id, patch) in &patches {
                commands::apply_patch(doc, id, patch);
            }
        });
        Ok(())
    }

    pub fn rename_item(&mut self, id: &str, label: impl Into<String>) -> Result<(), StoreError> {
        let patch = ItemPatch {
            label: Some(label.into()),
            ..ItemPatch::default()
        };
        self.update_item(id, patch)
    }

    pub fn set_item_style(&mut self, id: &str, style: ItemStyle) -> Result<(), StoreError> {
        let patch = ItemPatch {
            style: Some(style),
            ..ItemPatch::default()
        };
        self.update_item(id, patch)
    }

    /// Replaces an item's meta. The assigned code is kept.
    pub fn set_item_meta(&mut self, id: &str, meta: ItemMeta) -> Result<(), StoreError> {
        let patch = ItemPatch {
            meta: Some(meta),
            ..ItemPatch::default()
        };
        self.update_item(id, patch)
    }

    /// Switches an item's silhouette encoding, dropping the others.
    pub fn set_shape_mode(&mut self, id: &str, mode: ShapeMode) -> Result<(), StoreError> {
        let item = self.item_or_err(id)?;
        let patch = ItemPatch {
            shape: Some(shape_for_mode(item, mode)),
            ..ItemPatch::default()
        };
        self.update_item(id, patch)
    }

    /// Writes a finished shape edit and releases the pointer. Unchanged
    /// sessions write nothing.
    pub fn commit_shape_edit(&mut self, session: ShapeEditSession) -> Result<bool, StoreError> {
        self.drag.end();
        let id = session.item_id().clone();
        self.item_or_err(&id)?;
        match session.commit() {
            Some(shape) => {
                self.commit("edit_shape", |doc| {
                    commands::apply_patch(
                        doc,
                        &id,
                        &ItemPatch {
                            shape: Some(shape),
                            ..ItemPatch::default()
                        },
                    )
                });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Starts a shape edit on one item. Refused while another drag or edit
    /// is active.
    pub fn begin_shape_edit(&mut self, id: &str) -> Option<ShapeEditSession> {
        if self.drag.is_active() {
            return None;
        }
        let session = self.doc.item(id).and_then(ShapeEditSession::begin)?;
        self.drag.begin(DragKind::ShapePoint, &[id.to_string()]);
        Some(session)
    }

    /// Drops a shape edit without writing it.
    pub fn cancel_shape_edit(&mut self, session: ShapeEditSession) -> ItemId {
        self.drag.end();
        session.cancel()
    }

    /// Deletes the selected unlocked items. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<ItemId> = self
            .selection
            .items(&self.doc)
            .into_iter()
            .filter(|i| !i.is_locked())
            .map(|i| i.id.clone())
            .collect();
        if ids.is_empty() {
            return 0;
        }
        let removed = self.commit("delete_items", |doc| commands::delete_items(doc, &ids));
        self.prune_selection();
        removed.len()
    }

    pub fn toggle_lock_selected(&mut self) {
        let ids = self.selected_ids();
        self.commit("toggle_lock", |doc| commands::toggle_lock(doc, &ids));
    }

    pub fn bring_forward(&mut self) {
        let ids = self.selected_ids();
        self.commit("bring_forward", |doc| commands::bring_forward(doc, &ids));
    }

    pub fn send_backward(&mut self) {
        let ids = self.selected_ids();
        self.commit("send_backward", |doc| commands::send_backward(doc, &ids));
    }

    pub fn bring_to_front(&mut self) {
        let ids = self.selected_ids();
        self.commit("bring_to_front", |doc| commands::bring_to_front(doc, &ids));
    }

    pub fn send_to_back(&mut self) {
        let ids = self.selected_ids();
        self.commit("send_to_back", |doc| commands::send_to_back(doc, &ids));
    }

    /// Commits a body drag of the selection; snapped when the grid is on.
    pub fn move_selected(&mut self, dx: f64, dy: f64) {
        let ids = self.selected_ids();
        let step = self.grid_step();
        self.commit("move_items", |doc| commands::move_items(doc, &ids, dx, dy, step));
    }

    /// Arrow-key nudge. Never snapped so single steps stay possible.
    /// Returns false when nothing could move.
    pub fn nudge_selected(&mut self, dx: f64, dy: f64) -> bool {
        let ids = self.selected_ids();
        let movable = self.selection.items(&self.doc).iter().any(|i| !i.is_locked());
        if !movable || (dx == 0.0 && dy == 0.0) {
            return false;
        }
        self.commit("nudge", |doc| commands::move_items(doc, &ids, dx, dy, None));
        true
    }

    /// Starts a handle drag on the current selection. Refused while
    /// another drag is active.
    pub fn begin_transform(&mut self, hit: HandleHit, pointer: Point) -> Option<TransformSession> {
        if self.drag.is_active() {
            return None;
        }
        let items = self.selection.items(&self.doc);
        let session = TransformSession::begin(&items, hit, pointer, &self.handles)?;
        self.claim_drag(DragKind::Handle, &session);
        Some(session)
    }

    /// Starts a body drag on the current selection. Refused while another
    /// drag is active.
    pub fn begin_move(&mut self, pointer: Point) -> Option<TransformSession> {
        if self.drag.is_active() {
            return None;
        }
        let items = self.selection.items(&self.doc);
        let session = TransformSession::begin_move(&items, pointer)?;
        self.claim_drag(DragKind::Move, &session);
        Some(session)
    }

    /// Writes a finished transform as one history entry and releases the
    /// pointer.
    pub fn commit_transform(&mut self, session: TransformSession) {
        self.drag.end();
        let items = session.commit(self.grid_step());
        self.write_geometry("transform", &items);
    }

    /// Abandons a transform. The document is untouched; the returned
    /// originals let the caller restore its preview.
    pub fn cancel_transform(&mut self, session: TransformSession) -> Vec<StudioItem> {
        self.drag.end();
        session.cancel()
    }

    fn claim_drag(&mut self, kind: DragKind, session: &TransformSession) {
        let ids: Vec<ItemId> = session.originals().iter().map(|i| i.id.clone()).collect();
        self.drag.begin(kind, &ids);
    }

    fn write_geometry(&mut self, command: &str, items: &[StudioItem]) {
        self.commit(command, |doc| {
            for item in items {
                commands::apply_patch(doc, &item.id, &ItemPatch::geometry_of(item));
            }
        });
    }

    fn item_or_err(&self, id: &str) -> Result<&StudioItem, StoreError> {
        self.doc
            .item(id)
            .ok_or_else(|| StoreError::UnknownItem { id: id.to_string() })
    }

    /// Shape currently set on an item.
    pub fn item_shape(&self, id: &str) -> Option<&ShapePath> {
        self.doc.item(id).and_then(|i| i.meta.shape.as_ref())
    }
}
