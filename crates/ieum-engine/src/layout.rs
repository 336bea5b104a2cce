//! Layout engine: split a suggestion into positioned overlay lines.
//!
//! Wraps the post-processed prediction across at most three visual
//! rows using the measured average glyph width, without access to the
//! host's real text layout. Hangul glyphs count double against line
//! capacity.

use ieum_core::constants::{DEFAULT_CHAR_WIDTH, MAX_PREDICTION_LINES};
use ieum_core::text::glyph_width;

use crate::geometry::CursorPosition;

/// One visual row of the rendered suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionLine {
    /// Text content of the row.
    pub text: String,
    /// Horizontal position relative to the content box.
    pub x: f64,
    /// Vertical position relative to the content box.
    pub y: f64,
}

/// Split `text` into up to three positioned lines.
///
/// Line 0 starts at the caret and is limited by the width remaining on
/// the current visual line; subsequent lines span the full content
/// width between the paddings. Wrapping prefers the last space seen on
/// the line, hard-breaks when there is none, and always makes progress
/// by forcing at least one character. Text beyond the third line is
/// silently dropped.
pub fn layout(text: &str, cursor: &CursorPosition) -> Vec<PredictionLine> {
    if text.is_empty() {
        return Vec::new();
    }

    let char_width = if cursor.character_width > 0.0 {
        cursor.character_width
    } else {
        DEFAULT_CHAR_WIDTH
    };
    let first_capacity = capacity(cursor.available_width, char_width);
    let full_capacity = capacity(
        cursor.editor_width - 2.0 * cursor.padding_left,
        char_width,
    );

    let chars: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    let mut index = 0;

    for line_no in 0..MAX_PREDICTION_LINES {
        if index >= chars.len() {
            break;
        }
        let cap = if line_no == 0 {
            first_capacity
        } else {
            full_capacity
        };
        let (line_text, next) = fill_line(&chars, index, cap);
        let (x, y) = if line_no == 0 {
            (cursor.x, cursor.y)
        } else {
            (
                cursor.padding_left,
                cursor.y + line_no as f64 * cursor.line_height,
            )
        };
        lines.push(PredictionLine { text: line_text, x, y });
        index = next;
    }

    if index < chars.len() {
        tracing::trace!(
            dropped = chars.len() - index,
            "suggestion overflow beyond line limit dropped"
        );
    }

    lines
}

fn capacity(width: f64, char_width: f64) -> usize {
    if width <= 0.0 {
        0
    } else {
        (width / char_width).floor() as usize
    }
}

/// Consume characters for one line starting at `start`.
///
/// Returns the line text and the index the next line resumes at.
fn fill_line(chars: &[char], start: usize, cap: usize) -> (String, usize) {
    let mut width = 0;
    let mut last_space = None;
    let mut end = start;

    while end < chars.len() {
        let c = chars[end];
        if width + glyph_width(c) > cap {
            break;
        }
        if c == ' ' {
            last_space = Some(end);
        }
        width += glyph_width(c);
        end += 1;
    }

    // Everything fit.
    if end >= chars.len() {
        return (chars[start..end].iter().collect(), end);
    }

    // Not even one character fits; force one to guarantee progress.
    if end == start {
        return (chars[start..=start].iter().collect(), start + 1);
    }

    // Word-boundary-safe wrap: break at the last space when one was
    // seen on this line; the space itself is consumed by the break.
    if let Some(space) = last_space {
        if space > start {
            return (chars[start..space].iter().collect(), space + 1);
        }
    }

    (chars[start..end].iter().collect(), end)
}

// =============================================================================
// Tests
// =============================================================================
