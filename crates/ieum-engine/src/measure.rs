//! Glyph-width measurement cache.
//!
//! Measures a fixed multi-script probe string under the editor's font
//! and caches the derived average glyph width. The cache is invalidated
//! on viewport changes, since responsive breakpoints can swap font
//! metrics.

use std::sync::Arc;

use ieum_core::constants::MEASUREMENT_PROBE;
use ieum_core::measure::{FontSpec, TextMeasurer};
use ieum_core::text::{char_len, glyph_width};

/// Cached average glyph width per font configuration.
pub struct CharWidthCache {
    measurer: Arc<dyn TextMeasurer>,
    fallback: f64,
    cached: Option<(FontSpec, f64)>,
}

impl CharWidthCache {
    /// Cache backed by the given measurer, falling back to `fallback`
    /// pixels per character when measurement fails.
    pub fn new(measurer: Arc<dyn TextMeasurer>, fallback: f64) -> Self {
        Self {
            measurer,
            fallback,
            cached: None,
        }
    }

    /// Average glyph width for the font, measuring on first use.
    ///
    /// A failed or non-positive measurement falls back to the
    /// conservative default so the editor stays usable with imperfect
    /// alignment.
    pub fn char_width(&mut self, font: &FontSpec) -> f64 {
        if let Some((cached_font, width)) = &self.cached {
            if cached_font == font {
                return *width;
            }
        }

        let width = match self.measurer.measure(MEASUREMENT_PROBE, font) {
            Some(total) if total > 0.0 => total / char_len(MEASUREMENT_PROBE) as f64,
            _ => {
                tracing::debug!(
                    family = %font.family,
                    "glyph measurement unavailable, using fallback width"
                );
                self.fallback
            }
        };

        self.cached = Some((font.clone(), width));
        width
    }

    /// Drop the cached measurement (viewport changed).
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl std::fmt::Debug for CharWidthCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharWidthCache")
            .field("fallback", &self.fallback)
            .field("cached", &self.cached)
            .finish_non_exhaustive()
    }
}

/// Font-size based width estimator.
///
/// Stands in when the host cannot supply real rendering metrics: wide
/// glyphs take a full em, everything else a little over half. Hosts
/// with canvas or layout access should plug in their own
/// [`TextMeasurer`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasurer;

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, sample: &str, font: &FontSpec) -> Option<f64> {
        let width = sample
            .chars()
            .map(|c| {
                if glyph_width(c) == 2 {
                    font.size_px
                } else {
                    font.size_px * 0.55
                }
            })
            .sum();
        Some(width)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingMeasurer;

    impl TextMeasurer for FailingMeasurer {
        fn measure(&self, _sample: &str, _font: &FontSpec) -> Option<f64> {
            None
        }
    }

    struct ZeroMeasurer;

    impl TextMeasurer for ZeroMeasurer {
        fn measure(&self, _sample: &str, _font: &FontSpec) -> Option<f64> {
            Some(0.0)
        }
    }

    struct CountingMeasurer {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl TextMeasurer for CountingMeasurer {
        fn measure(&self, sample: &str, _font: &FontSpec) -> Option<f64> {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Some(10.0 * char_len(sample) as f64)
        }
    }

    #[test]
    fn measures_average_width() {
        let mut cache = CharWidthCache::new(Arc::new(CountingMeasurer {
            calls: Default::default(),
        }), 8.0);
        let width = cache.char_width(&FontSpec::default());
        assert_eq!(width, 10.0);
    }

    #[test]
    fn caches_per_font() {
        let measurer = Arc::new(CountingMeasurer {
            calls: Default::default(),
        });
        let mut cache = CharWidthCache::new(measurer.clone(), 8.0);

        let font = FontSpec::default();
        cache.char_width(&font);
        cache.char_width(&font);
        assert_eq!(measurer.calls.load(std::sync::atomic::Ordering::SeqCst), 1);

        // A different font re-measures.
        cache.char_width(&FontSpec::new("serif", 18.0));
        assert_eq!(measurer.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_forces_remeasure() {
        let measurer = Arc::new(CountingMeasurer {
            calls: Default::default(),
        });
        let mut cache = CharWidthCache::new(measurer.clone(), 8.0);

        let font = FontSpec::default();
        cache.char_width(&font);
        cache.invalidate();
        cache.char_width(&font);
        assert_eq!(measurer.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_measurement_falls_back() {
        let mut cache = CharWidthCache::new(Arc::new(FailingMeasurer), 8.0);
        assert_eq!(cache.char_width(&FontSpec::default()), 8.0);
    }

    #[test]
    fn zero_width_measurement_falls_back() {
        let mut cache = CharWidthCache::new(Arc::new(ZeroMeasurer), 8.0);
        assert_eq!(cache.char_width(&FontSpec::default()), 8.0);
    }

    #[test]
    fn heuristic_widths_scale_with_font_size() {
        let measurer = HeuristicMeasurer;
        let narrow = measurer.measure("abc", &FontSpec::new("sans", 16.0)).unwrap();
        let wide = measurer.measure("가나다", &FontSpec::new("sans", 16.0)).unwrap();
        assert!(wide > narrow);
    }
}
