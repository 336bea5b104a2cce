//! Context extraction from live editor state.
//!
//! Derives a structured snapshot of the text around the caret. The
//! extractor never fails loudly: anything unusual (editor not ready, a
//! range selection, offsets out of bounds) yields `None` and prediction
//! is simply suppressed.

use crate::text::{char_len, slice_chars};

/// Caret rectangle relative to the editor's content box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretRect {
    /// Horizontal offset of the caret.
    pub x: f64,
    /// Vertical offset of the caret.
    pub y: f64,
    /// Caret height.
    pub height: f64,
}

/// Raw editor state consumed from the host editor adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    /// Whether the editor is mounted and usable.
    pub ready: bool,
    /// Full document plain-text content.
    pub text: String,
    /// Selection start as a character offset.
    pub selection_start: usize,
    /// Selection end as a character offset.
    pub selection_end: usize,
    /// Text content of the structural block containing the cursor.
    pub current_paragraph: String,
    /// Caret geometry, when the host has it available.
    pub caret: Option<CaretRect>,
}

impl EditorSnapshot {
    /// Snapshot with a collapsed caret at the given character offset.
    pub fn with_caret_at(text: impl Into<String>, cursor: usize) -> Self {
        let text = text.into();
        Self {
            ready: true,
            current_paragraph: text.clone(),
            text,
            selection_start: cursor,
            selection_end: cursor,
            caret: None,
        }
    }
}

/// Structured view of the document around a collapsed caret.
///
/// Recomputed on every relevant edit; holds owned slices so it stays
/// valid while a remote request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionContext {
    /// Full document plain-text content.
    pub text: String,
    /// Caret character offset within `text`.
    pub cursor_position: usize,
    /// Text before the caret.
    pub text_before_cursor: String,
    /// Text after the caret.
    pub text_after_cursor: String,
    /// Paragraph containing the caret.
    pub current_paragraph: String,
    /// True when nothing non-whitespace follows on the current line.
    pub is_at_end_of_line: bool,
    /// True when the caret sits at the very end of the document.
    pub is_at_end_of_document: bool,
}

/// Extract a prediction context from an editor snapshot.
///
/// Returns `None` when the editor is not ready, the selection is a
/// non-empty range, or the offsets do not fit the text. Failure is
/// always silent; prediction is advisory and must never interrupt
/// typing.
pub fn extract(snapshot: &EditorSnapshot) -> Option<PredictionContext> {
    if !snapshot.ready {
        return None;
    }
    // Only a collapsed caret triggers prediction.
    if snapshot.selection_start != snapshot.selection_end {
        return None;
    }

    let cursor = snapshot.selection_start;
    let total = char_len(&snapshot.text);
    if cursor > total {
        tracing::debug!(cursor, total, "cursor offset out of range");
        return None;
    }

    let before = slice_chars(&snapshot.text, 0, cursor).to_string();
    let after = slice_chars(&snapshot.text, cursor, total).to_string();

    // End of line means nothing but a line break follows, and the caret
    // is not sitting immediately before a plain space.
    let is_at_end_of_line =
        (after.is_empty() || after.starts_with('\n')) && !after.starts_with(' ');
    let is_at_end_of_document = after.is_empty();

    Some(PredictionContext {
        text: snapshot.text.clone(),
        cursor_position: cursor,
        text_before_cursor: before,
        text_after_cursor: after,
        current_paragraph: snapshot.current_paragraph.clone(),
        is_at_end_of_line,
        is_at_end_of_document,
    })
}

// =============================================================================
// Tests
// =============================================================================
