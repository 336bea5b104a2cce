//! Screen-space caret geometry.
//!
//! The layout engine positions overlay lines relative to the live
//! caret without access to the host's real layout engine; everything it
//! needs is captured in a [`CursorPosition`] snapshot.

use ieum_core::context::CaretRect;
use ieum_core::measure::FontSpec;

/// Static editor box metrics supplied by the host adapter.
///
/// Horizontal padding is assumed symmetric; only the left value is
/// carried.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorMetrics {
    /// Content-box width in pixels.
    pub content_width: f64,
    /// Left padding in pixels.
    pub padding_left: f64,
    /// Line height in pixels.
    pub line_height: f64,
    /// Editor font stack.
    pub font: FontSpec,
}

impl EditorMetrics {
    /// Metrics with the default font.
    pub fn new(content_width: f64, padding_left: f64, line_height: f64) -> Self {
        Self {
            content_width,
            padding_left,
            line_height,
            font: FontSpec::default(),
        }
    }
}

/// Geometry snapshot of the caret, recomputed on every relevant editor
/// or viewport event and discarded when the overlay hides.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPosition {
    /// Caret x offset relative to the content box.
    pub x: f64,
    /// Caret y offset relative to the content box.
    pub y: f64,
    /// Caret height.
    pub height: f64,
    /// Editor line height.
    pub line_height: f64,
    /// Content-box width.
    pub editor_width: f64,
    /// Width remaining from the caret to the right padding boundary.
    pub available_width: f64,
    /// Measured average glyph width.
    pub character_width: f64,
    /// Left padding.
    pub padding_left: f64,
}

impl CursorPosition {
    /// Compute the snapshot from a caret rectangle and editor metrics.
    pub fn compute(caret: &CaretRect, metrics: &EditorMetrics, character_width: f64) -> Self {
        let available_width = (metrics.content_width - metrics.padding_left - caret.x).max(0.0);
        Self {
            x: caret.x,
            y: caret.y,
            height: caret.height,
            line_height: metrics.line_height,
            editor_width: metrics.content_width,
            available_width,
            character_width,
            padding_left: metrics.padding_left,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
