//! Overlay renderer state.
//!
//! Holds the positioned suggestion lines and the visibility flag. The
//! overlay is strictly decorative: the host paints each line as a
//! non-interactive, non-selectable layer above the live text, sharing
//! the editor's font and line height so it aligns with real glyphs.

use crate::layout::PredictionLine;

/// Snapshot of what the host should paint.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    /// Suggestion text as a single string.
    pub suggestion: String,
    /// Positioned rows.
    pub lines: Vec<PredictionLine>,
}

/// Overlay state for the prediction suggestion.
#[derive(Debug, Default)]
pub struct OverlayRenderer {
    suggestion: Option<String>,
    lines: Vec<PredictionLine>,
    visible: bool,
}

impl OverlayRenderer {
    /// New hidden overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a suggestion with its positioned lines.
    ///
    /// An empty suggestion or empty layout hides the overlay instead;
    /// there is never a visible-but-empty state.
    pub fn show(&mut self, suggestion: impl Into<String>, lines: Vec<PredictionLine>) {
        let suggestion = suggestion.into();
        if suggestion.is_empty() || lines.is_empty() {
            self.hide();
            return;
        }
        self.suggestion = Some(suggestion);
        self.lines = lines;
        self.visible = true;
    }

    /// Clear the overlay.
    pub fn hide(&mut self) {
        self.suggestion = None;
        self.lines.clear();
        self.visible = false;
    }

    /// Whether a suggestion is currently displayed.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current suggestion text, when visible.
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Current positioned lines.
    pub fn lines(&self) -> &[PredictionLine] {
        &self.lines
    }

    /// Paintable snapshot, `None` when hidden.
    pub fn frame(&self) -> Option<OverlayFrame> {
        if !self.visible {
            return None;
        }
        self.suggestion.as_ref().map(|s| OverlayFrame {
            suggestion: s.clone(),
            lines: self.lines.clone(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, x: f64, y: f64) -> PredictionLine {
        PredictionLine {
            text: text.into(),
            x,
            y,
        }
    }

    #[test]
    fn new_overlay_is_hidden() {
        let overlay = OverlayRenderer::new();
        assert!(!overlay.is_visible());
        assert!(overlay.frame().is_none());
        assert!(overlay.lines().is_empty());
    }

    #[test]
    fn show_makes_visible() {
        let mut overlay = OverlayRenderer::new();
        overlay.show("계속 작성", vec![line("계속 작성", 10.0, 20.0)]);

        assert!(overlay.is_visible());
        assert_eq!(overlay.suggestion(), Some("계속 작성"));
        let frame = overlay.frame().unwrap();
        assert_eq!(frame.lines.len(), 1);
        assert_eq!(frame.suggestion, "계속 작성");
    }

    #[test]
    fn hide_clears_everything() {
        let mut overlay = OverlayRenderer::new();
        overlay.show("text", vec![line("text", 0.0, 0.0)]);
        overlay.hide();

        assert!(!overlay.is_visible());
        assert!(overlay.suggestion().is_none());
        assert!(overlay.lines().is_empty());
        assert!(overlay.frame().is_none());
    }

    #[test]
    fn empty_suggestion_never_shows() {
        let mut overlay = OverlayRenderer::new();
        overlay.show("", vec![line("x", 0.0, 0.0)]);
        assert!(!overlay.is_visible());

        overlay.show("something", Vec::new());
        assert!(!overlay.is_visible());
    }

    #[test]
    fn show_replaces_previous_state() {
        let mut overlay = OverlayRenderer::new();
        overlay.show("first", vec![line("first", 0.0, 0.0)]);
        overlay.show("second", vec![line("sec", 0.0, 0.0), line("ond", 0.0, 28.0)]);

        assert_eq!(overlay.suggestion(), Some("second"));
        assert_eq!(overlay.lines().len(), 2);
    }
}
