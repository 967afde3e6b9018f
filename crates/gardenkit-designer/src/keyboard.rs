//! Keyboard shortcuts for the layout editor.

/// Toolkit-independent key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Escape,
    Delete,
    Backspace,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS; treated like Ctrl.
    pub meta: bool,
}

impl Modifiers {
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Whether the key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub phase: KeyPhase,
    /// Focus is in a text-editing control.
    pub text_focus: bool,
    /// Auto-repeat of a held key.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn down(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            phase: KeyPhase::Down,
            text_focus: false,
            repeat: false,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            phase: KeyPhase::Up,
            text_focus: false,
            repeat: false,
        }
    }
}

/// What a shortcut asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    BeginPan,
    EndPan,
    /// Clears the selection, cancels a pan or an active edit.
    Escape,
    DeleteSelection,
    Copy,
    Paste,
    Duplicate,
    Undo,
    Redo,
    Nudge { dx: f64, dy: f64 },
}

/// Maps a key event to an editor action.
///
/// Everything is suppressed while a text field has focus so typing never
/// edits the layout.
pub fn map_key(event: &KeyEvent) -> Option<EditorAction> {
    if event.text_focus {
        return None;
    }
    let command = event.modifiers.command();
    let shift = event.modifiers.shift;

    if event.phase == KeyPhase::Up {
        return match event.key {
            Key::Space => Some(EditorAction::EndPan),
            _ => None,
        };
    }

    let step = if shift { 10.0 } else { 1.0 };
    match (event.key, command, shift) {
        (Key::Space, false, _) if !event.repeat => Some(EditorAction::BeginPan),
        (Key::Escape, _, _) => Some(EditorAction::Escape),
        (Key::Delete, false, _) | (Key::Backspace, false, _) => {
            Some(EditorAction::DeleteSelection)
        }
        (Key::Char(c), true, _) => match c.to_ascii_lowercase() {
            'c' => Some(EditorAction::Copy),
            'v' => Some(EditorAction::Paste),
            'd' => Some(EditorAction::Duplicate),
            'z' if shift => Some(EditorAction::Redo),
            'z' => Some(EditorAction::Undo),
            _ => None,
        },
        (Key::ArrowLeft, false, _) => Some(EditorAction::Nudge { dx: -step, dy: 0.0 }),
        (Key::ArrowRight, false, _) => Some(EditorAction::Nudge { dx: step, dy: 0.0 }),
        (Key::ArrowUp, false, _) => Some(EditorAction::Nudge { dx: 0.0, dy: -step }),
        (Key::ArrowDown, false, _) => Some(EditorAction::Nudge { dx: 0.0, dy: step }),
        _ => None,
    }
}
