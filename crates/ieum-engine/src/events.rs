//! Editor event surface.
//!
//! The host editor adapter translates its framework's hooks into these
//! explicit events; the controller consumes them over a channel and
//! emits [`OverlayUpdate`]s back.

use ieum_core::context::EditorSnapshot;

use crate::geometry::EditorMetrics;
use crate::layout::PredictionLine;

/// Arrow keys, all preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

/// Modifier keys pressed on their own, all preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKey {
    Shift,
    Control,
    Alt,
    Meta,
}

/// Key input as seen by the prediction subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Accepts the visible suggestion.
    Tab,
    /// Dismisses the visible suggestion.
    Escape,
    Arrow(ArrowKey),
    Modifier(ModifierKey),
    Char(char),
    Backspace,
    Enter,
    Delete,
    /// Anything else the adapter does not map.
    Other,
}

/// What a key does to the prediction overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Insert the suggestion into the document.
    Apply,
    /// Clear the overlay immediately.
    Dismiss,
    /// Leave the overlay untouched.
    Preserve,
    /// Clear the overlay once the keystroke has applied.
    ClearAfterInput,
}

/// Classify a key per the clear-on-any-non-preserved-keypress rule:
/// Tab applies, Escape dismisses, arrows and lone modifiers preserve,
/// everything else clears after the keystroke lands.
pub fn classify_key(key: KeyInput) -> KeyAction {
    match key {
        KeyInput::Tab => KeyAction::Apply,
        KeyInput::Escape => KeyAction::Dismiss,
        KeyInput::Arrow(_) | KeyInput::Modifier(_) => KeyAction::Preserve,
        _ => KeyAction::ClearAfterInput,
    }
}

/// Inbound events from the host editor adapter.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// Document content changed.
    ContentChanged(EditorSnapshot),
    /// Selection or caret moved without a content change.
    SelectionChanged(EditorSnapshot),
    /// Window resized or scrolled; editor box metrics refreshed.
    ViewportChanged(EditorMetrics),
    /// Raw key input, delivered after the editor applied it.
    Key(KeyInput),
    /// Stop the controller.
    Shutdown,
}

/// Outbound updates for the host UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayUpdate {
    /// Display a suggestion.
    Show {
        /// Full suggestion text.
        suggestion: String,
        /// Positioned overlay rows.
        lines: Vec<PredictionLine>,
    },
    /// Clear the overlay.
    Hide,
    /// The user accepted this suggestion; the host inserts it.
    Applied(String),
}

// =============================================================================
// Tests
// =============================================================================
