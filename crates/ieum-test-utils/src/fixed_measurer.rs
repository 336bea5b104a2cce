//! Deterministic glyph measurement.

use std::sync::atomic::{AtomicU64, Ordering};

use ieum_core::measure::{FontSpec, TextMeasurer};

/// Measurer that reports a fixed width per character.
///
/// Width is per character, not per column, so layout tests can pick
/// round numbers without caring about the probe string's composition.
#[derive(Debug)]
pub struct FixedMeasurer {
    char_width: Option<f64>,
    calls: AtomicU64,
}

impl FixedMeasurer {
    /// Measurer giving every character the same width.
    pub fn uniform(char_width: f64) -> Self {
        Self {
            char_width: Some(char_width),
            calls: AtomicU64::new(0),
        }
    }

    /// Measurer that always fails, exercising fallback paths.
    pub fn unavailable() -> Self {
        Self {
            char_width: None,
            calls: AtomicU64::new(0),
        }
    }

    /// Number of measure calls made so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, sample: &str, _font: &FontSpec) -> Option<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let width = self.char_width?;
        Some(sample.chars().count() as f64 * width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_width_scales_with_char_count() {
        let measurer = FixedMeasurer::uniform(8.0);
        let font = FontSpec::default();
        assert_eq!(measurer.measure("abcd", &font), Some(32.0));
        assert_eq!(measurer.measure("가나", &font), Some(16.0));
        assert_eq!(measurer.call_count(), 2);
    }

    #[test]
    fn unavailable_returns_none() {
        let measurer = FixedMeasurer::unavailable();
        assert_eq!(measurer.measure("abcd", &FontSpec::default()), None);
    }
}
