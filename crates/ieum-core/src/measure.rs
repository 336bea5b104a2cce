//! Text measurement capability.
//!
//! Glyph-width measurement depends on the host's rendering stack, so it
//! sits behind a trait: production hosts plug in real canvas/layout
//! metrics, tests supply deterministic fakes.

/// Font configuration the measurement is taken under.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family stack, as the editor declares it.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f64,
    /// Numeric font weight.
    pub weight: u16,
}

impl FontSpec {
    /// Font spec with the given family and size, regular weight.
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight: 400,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Pretendard, sans-serif", 16.0)
    }
}

/// Measures the rendered pixel width of a sample string.
///
/// Returns `None` when measurement is unavailable (probe not mounted,
/// host not ready); callers fall back to a conservative default width
/// rather than failing.
pub trait TextMeasurer: Send + Sync {
    /// Rendered width of `sample` under `font`, in pixels.
    fn measure(&self, sample: &str, font: &FontSpec) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_spec_defaults() {
        let font = FontSpec::default();
        assert_eq!(font.size_px, 16.0);
        assert_eq!(font.weight, 400);
    }

    #[test]
    fn font_spec_equality() {
        let a = FontSpec::new("serif", 14.0);
        let b = FontSpec::new("serif", 14.0);
        let c = FontSpec::new("serif", 15.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
