//! Event type definitions for the store event bus.

use serde::{Deserialize, Serialize};

/// Events emitted by the workspace store after state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// A document patch was committed (history snapshot taken).
    DocumentCommitted {
        /// Layout whose document changed.
        layout_id: String,
        /// Name of the command that produced the patch.
        command: String,
    },
    /// Undo or redo replaced the active document.
    HistoryMoved {
        /// Layout whose document changed.
        layout_id: String,
        /// Remaining undo depth.
        undo_depth: usize,
        /// Remaining redo depth.
        redo_depth: usize,
    },
    /// Selection set changed.
    SelectionChanged {
        /// Number of selected items.
        count: usize,
    },
    /// Active garden or layout changed.
    ActiveLayoutChanged {
        /// Newly active garden.
        garden_id: String,
        /// Newly active layout.
        layout_id: String,
    },
    /// Garden or layout list changed (create, rename, delete, publish).
    WorkspaceChanged,
    /// A debounced save completed.
    Saved {
        /// Tenant key the workspace was saved under.
        tenant: String,
    },
    /// A recoverable failure the caller should surface.
    Failure {
        /// Human readable message.
        message: String,
    },
}

impl StoreEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            StoreEvent::DocumentCommitted { .. } | StoreEvent::HistoryMoved { .. } => {
                EventCategory::Document
            }
            StoreEvent::SelectionChanged { .. } => EventCategory::Selection,
            StoreEvent::ActiveLayoutChanged { .. } | StoreEvent::WorkspaceChanged => {
                EventCategory::Workspace
            }
            StoreEvent::Saved { .. } => EventCategory::Persistence,
            StoreEvent::Failure { .. } => EventCategory::Error,
        }
    }

    /// Whether the event marks a change that should eventually be persisted.
    pub fn is_settled_change(&self) -> bool {
        matches!(
            self,
            StoreEvent::DocumentCommitted { .. }
                | StoreEvent::HistoryMoved { .. }
                | StoreEvent::ActiveLayoutChanged { .. }
                | StoreEvent::WorkspaceChanged
        )
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            StoreEvent::DocumentCommitted { layout_id, command } => {
                format!("{command} on {layout_id}")
            }
            StoreEvent::HistoryMoved {
                layout_id,
                undo_depth,
                redo_depth,
            } => format!("History {layout_id}: undo {undo_depth}, redo {redo_depth}"),
            StoreEvent::SelectionChanged { count } => format!("Selected: {count} items"),
            StoreEvent::ActiveLayoutChanged { layout_id, .. } => {
                format!("Active layout: {layout_id}")
            }
            StoreEvent::WorkspaceChanged => "Workspace changed".to_string(),
            StoreEvent::Saved { tenant } => format!("Saved workspace for {tenant}"),
            StoreEvent::Failure { message } => format!("Failure: {message}"),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Document commits and history moves.
    Document,
    /// Selection changes.
    Selection,
    /// Garden/layout list and active layout.
    Workspace,
    /// Persistence results.
    Persistence,
    /// Recoverable failures.
    Error,
}
