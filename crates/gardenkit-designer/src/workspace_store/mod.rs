//! The workspace store: one owner for every garden, layout and document,
//! plus the active layout's history, selection and clipboard.
//!
//! This module is split into submodules:
//! - `items`: item commands on the active document
//! - `clipboard`: copy, paste and duplicate
//! - `history`: undo/redo
//! - `selection`: selection queries and updates
//! - `gardens`: garden and layout management, publishing marks
//!
//! Every command that changes the active document goes through
//! [`WorkspaceStore::commit`], which records the pre-change snapshot before
//! applying anything. Observers subscribe through the injected [`EventBus`].

mod clipboard;
mod gardens;
mod history;
mod items;
mod selection;

use std::sync::Arc;

use chrono::Utc;
use gardenkit_core::{EventBus, Point, StoreEvent};
use gardenkit_settings::{EditorConfig, GridSettings};

use crate::clipboard::Clipboard;
use crate::history::UndoRedoManager;
use crate::interaction::{DragGuard, DragKind};
use crate::keyboard::EditorAction;
use crate::model::{Garden, Layout, LayoutDoc, WorkspaceData};
use crate::persistence::SnapshotSink;
use crate::selection_manager::SelectionManager;
use crate::transform::HandleGeometry;

/// Owner of the tenant's workspace.
///
/// The active layout's document lives outside `data.docs` while it is
/// active; [`WorkspaceStore::snapshot`] reassembles the full workspace.
pub struct WorkspaceStore {
    data: WorkspaceData,
    doc: LayoutDoc,
    history: UndoRedoManager,
    selection: SelectionManager,
    clipboard: Clipboard,
    drag: DragGuard,
    events: Arc<EventBus>,
    grid: GridSettings,
    handles: HandleGeometry,
    sink: Option<Arc<dyn SnapshotSink>>,
}

impl WorkspaceStore {
    /// Takes ownership of loaded workspace data. Data that cannot be
    /// repaired is replaced by a fresh seed.
    pub fn new(mut data: WorkspaceData, config: &EditorConfig, events: Arc<EventBus>) -> Self {
        if !data.normalize() {
            tracing::warn!("Workspace has no layouts, seeding a new one");
            data = WorkspaceData::seed();
        }
        let doc = data.docs.remove(&data.active_layout_id).unwrap_or_default();
        Self {
            data,
            doc,
            history: UndoRedoManager::new(config.history_limit),
            selection: SelectionManager::new(),
            clipboard: Clipboard::new(),
            drag: DragGuard::new(),
            events,
            grid: config.grid.clone(),
            handles: HandleGeometry::from(config),
            sink: None,
        }
    }

    /// A freshly seeded store.
    pub fn seeded(config: &EditorConfig, events: Arc<EventBus>) -> Self {
        Self::new(WorkspaceData::seed(), config, events)
    }

    /// Attaches the receiver of settled snapshots (normally the autosave worker).
    pub fn with_sink(mut self, sink: Arc<dyn SnapshotSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// The active layout's document.
    pub fn doc(&self) -> &LayoutDoc {
        &self.doc
    }

    pub fn gardens(&self) -> &[Garden] {
        &self.data.gardens
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.data.layouts
    }

    pub fn layouts_of<'a>(&'a self, garden_id: &'a str) -> impl Iterator<Item = &'a Layout> + 'a {
        self.data.layouts_of(garden_id)
    }

    pub fn active_garden_id(&self) -> &str {
        &self.data.active_garden_id
    }

    pub fn active_layout_id(&self) -> &str {
        &self.data.active_layout_id
    }

    pub fn active_layout(&self) -> Option<&Layout> {
        self.data.layout(&self.data.active_layout_id)
    }

    pub fn active_garden(&self) -> Option<&Garden> {
        self.data.garden(&self.data.active_garden_id)
    }

    /// Document of any layout, active or not.
    pub fn doc_of(&self, layout_id: &str) -> Option<&LayoutDoc> {
        if layout_id == self.data.active_layout_id {
            Some(&self.doc)
        } else {
            self.data.docs.get(layout_id)
        }
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    pub fn set_grid(&mut self, grid: GridSettings) {
        self.grid = grid;
    }

    /// Grid step to snap commits to, when snapping is on.
    pub fn grid_step(&self) -> Option<f64> {
        (self.grid.snap_enabled && self.grid.step > 0.0).then_some(self.grid.step)
    }

    pub fn handle_geometry(&self) -> &HandleGeometry {
        &self.handles
    }

    /// The drag or edit session currently holding the pointer, if any.
    pub fn active_drag(&self) -> Option<DragKind> {
        self.drag.active()
    }

    /// False while a handle drag or shape edit owns `id`.
    pub fn native_move_enabled(&self, id: &str) -> bool {
        self.drag.native_move_enabled(id)
    }

    /// Complete workspace for persistence.
    pub fn snapshot(&self) -> WorkspaceData {
        let mut data = self.data.clone();
        data.docs
            .insert(self.data.active_layout_id.clone(), self.doc.clone());
        data
    }

    /// True while a settled change has not been written to storage.
    pub fn has_pending_save(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.is_pending())
    }

    /// `"<garden> / <layout>"`, with a trailing `*` while a save is pending.
    pub fn display_name(&self) -> String {
        let garden = self.active_garden().map(|g| g.name.as_str()).unwrap_or("");
        let layout = self.active_layout().map(|l| l.name.as_str()).unwrap_or("");
        let name = format!("{} / {}", garden, layout);
        if self.has_pending_save() {
            format!("{}*", name)
        } else {
            name
        }
    }

    /// Runs a keyboard action. Pan actions belong to the viewport and are
    /// not handled here. Returns true if the store acted.
    ///
    /// `anchor` is where a paste lands: the cursor in world space, or the
    /// viewport center.
    pub fn apply_action(&mut self, action: EditorAction, anchor: Point) -> bool {
        match action {
            EditorAction::Escape => {
                let had = !self.selection.is_empty();
                self.deselect_all();
                had
            }
            EditorAction::DeleteSelection => self.delete_selected() > 0,
            EditorAction::Copy => self.copy_selected() > 0,
            EditorAction::Paste => !self.paste_at(anchor).is_empty(),
            EditorAction::Duplicate => !self.duplicate_selected().is_empty(),
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::Nudge { dx, dy } => self.nudge_selected(dx, dy),
            EditorAction::BeginPan | EditorAction::EndPan => false,
        }
    }

    /// The document-patch primitive.
    ///
    /// Snapshots the active document, applies `apply`, and if anything
    /// changed records the snapshot, stamps the layout's `updated_at`,
    /// notifies observers and offers the workspace for saving. Edits that
    /// leave the document untouched leave no history entry.
    pub(crate) fn commit<R>(&mut self, command: &str, apply: impl FnOnce(&mut LayoutDoc) -> R) -> R {
        let before = self.doc.clone();
        let result = apply(&mut self.doc);
        if self.doc == before {
            return result;
        }
        self.history.record(before);
        self.touch_active_layout();
        tracing::debug!(
            "{} on layout {} ({} items)",
            command,
            self.data.active_layout_id,
            self.doc.items.len()
        );
        self.emit(StoreEvent::DocumentCommitted {
            layout_id: self.data.active_layout_id.clone(),
            command: command.to_string(),
        });
        self.settle();
        result
    }

    fn touch_active_layout(&mut self) {
        let id = self.data.active_layout_id.clone();
        if let Some(layout) = self.data.layouts.iter_mut().find(|l| l.id == id) {
            layout.updated_at = Utc::now();
        }
    }

    fn emit(&self, event: StoreEvent) {
        // no subscribers is not an error for the store
        let _ = self.events.publish(event);
    }

    /// Offers the current workspace to the snapshot sink.
    fn settle(&self) {
        if let Some(sink) = &self.sink {
            sink.offer(&self.snapshot());
        }
    }
}

impl std::fmt::Debug for WorkspaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceStore")
            .field("active_layout_id", &self.data.active_layout_id)
            .field("items", &self.doc.items.len())
            .field("selected", &self.selection.len())
            .field("undo_depth", &self.history.undo_depth())
            .finish()
    }
}
