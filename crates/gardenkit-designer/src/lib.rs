//! # GardenKit Designer
//!
//! Canvas editing engine for garden layouts. Items (beds, zones, trees,
//! paths, structures) are placed on a world-space canvas, reshaped through
//! one of four silhouette encodings, and arranged with selection handles.
//! All edits flow through a workspace store that owns history, selection,
//! clipboard and persistence hooks.
//!
//! ## Core Components
//!
//! ### Document
//! - **Model**: items, shape paths, layout documents, gardens and layouts
//! - **Codes**: per-type human readable item codes (`BED-001`)
//! - **Commands**: pure document patches (add, update, delete, reorder)
//!
//! ### Editing
//! - **Viewport**: pan/zoom with camera clamping
//! - **Selection**: hit testing, marquee and handle sets
//! - **Transform**: corner resize and rotate sessions
//! - **Shape editor**: radius, polygon, curvature and bezier markers
//! - **Keyboard**: key events to editor actions
//!
//! ### Store
//! - **History**: bounded snapshot undo/redo
//! - **Clipboard**: copy, paste and duplicate with fresh ids and codes
//! - **Persistence**: providers, storage format and snapshot sinks
//!
//! ## Architecture
//!
//! ```text
//! WorkspaceStore
//!   ├── WorkspaceData (gardens, layouts, inactive docs)
//!   ├── LayoutDoc (active document)
//!   ├── UndoRedoManager / SelectionManager / Clipboard
//!   └── EventBus + SnapshotSink (observers, autosave)
//!
//! Viewport ── screen <-> world
//! TransformSession / ShapeEditSession ── drafts committed back to the store
//! Renderer ── draw list from the document + drafts
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gardenkit_core::{EventBus, Point};
//! use gardenkit_designer::{model::ItemType, WorkspaceStore};
//! use gardenkit_settings::EditorConfig;
//!
//! let mut store = WorkspaceStore::seeded(&EditorConfig::default(), Arc::new(EventBus::new()));
//! let id = store.add_item_at_world(ItemType::Bed, Point::new(100.0, 100.0));
//! store.undo();
//! ```

pub mod clipboard;
pub mod codes;
pub mod commands;
pub mod history;
pub mod interaction;
pub mod keyboard;
pub mod model;
pub mod persistence;
pub mod render_policy;
pub mod renderer;
pub mod selection_manager;
pub mod serialization;
pub mod shape_editor;
pub mod transform;
pub mod viewport;
pub mod workspace_store;

pub use clipboard::Clipboard;
pub use codes::{format_code, CodeAllocator};
pub use commands::ItemPatch;
pub use history::UndoRedoManager;
pub use interaction::{DragGuard, DragKind, FrameThrottle};
pub use keyboard::{map_key, EditorAction, Key, KeyEvent, KeyPhase, Modifiers};
pub use model::{
    Garden, ItemType, Layout, LayoutDoc, ShapeMode, ShapePath, StudioItem, WorkspaceData,
};
pub use persistence::{
    load_or_seed, JsonFileProvider, MemoryProvider, PersistenceProvider, SnapshotSink,
};
pub use render_policy::{should_cache, ViewState};
pub use renderer::{draw_list, DrawItem};
pub use selection_manager::{hit_test, SelectionManager};
pub use serialization::{decode_workspace, encode_workspace, LayoutFile, StoredWorkspace};
pub use shape_editor::{Marker, ShapeEditSession, ShapeTarget};
pub use transform::{HandleGeometry, HandleHit, HandleKind, HandleSet, TransformSession};
pub use viewport::{CameraClamp, Viewport};
pub use workspace_store::WorkspaceStore;
