//! Transient pointer-interaction state that never reaches the document.

/// Holds at most one pending update per animation frame.
///
/// Each `push` replaces whatever is queued, so intermediate pointer moves
/// are dropped and the frame always applies the newest one.
#[derive(Debug, Clone)]
pub struct FrameThrottle<T> {
    pending: Option<T>,
    dropped: u64,
}

impl<T> Default for FrameThrottle<T> {
    fn default() -> Self {
        Self {
            pending: None,
            dropped: 0,
        }
    }
}

impl<T> FrameThrottle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `update`. Returns true when a frame needs to be requested,
    /// i.e. nothing was queued yet.
    pub fn push(&mut self, update: T) -> bool {
        let first = self.pending.is_none();
        if !first {
            self.dropped += 1;
        }
        self.pending = Some(update);
        first
    }

    /// Takes the update for this frame.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Discards the queued update, for cancellation.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Updates superseded before their frame ran.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Ownership of the single active drag.
///
/// While a drag runs the dragged items' native drag-move is disabled and a
/// second pointer-down is refused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragGuard {
    active: Option<DragKind>,
    native_move_disabled: Vec<String>,
}

/// What the active drag is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Handle,
    ShapePoint,
    Marquee,
    Pan,
}

impl DragGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the drag for `items`. Returns false if one is already active.
    pub fn begin(&mut self, kind: DragKind, items: &[String]) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(kind);
        if kind != DragKind::Move {
            self.native_move_disabled = items.to_vec();
        }
        true
    }

    /// Releases the drag and restores native drag-move.
    pub fn end(&mut self) -> Option<DragKind> {
        self.native_move_disabled.clear();
        self.active.take()
    }

    pub fn active(&self) -> Option<DragKind> {
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `id` may currently be dragged by the item itself.
    pub fn native_move_enabled(&self, id: &str) -> bool {
        !self.native_move_disabled.iter().any(|d| d == id)
    }
}
