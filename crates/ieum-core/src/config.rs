//! Prediction subsystem configuration.

use std::time::Duration;

use crate::constants::{
    CACHE_CAPACITY, CACHE_TTL, DEFAULT_CHAR_WIDTH, INPUT_DEBOUNCE, VIEWPORT_DEBOUNCE,
};
use crate::measure::FontSpec;

/// Configuration for the prediction controller.
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    /// Master switch; a disabled subsystem ignores all events.
    pub enabled: bool,
    /// Debounce applied to content/selection updates.
    pub input_debounce: Duration,
    /// Debounce applied to viewport resize/scroll.
    pub viewport_debounce: Duration,
    /// Prediction cache capacity.
    pub cache_capacity: usize,
    /// Prediction cache entry TTL.
    pub cache_ttl: Duration,
    /// Character width used when measurement fails.
    pub fallback_char_width: f64,
    /// Editor font, used for glyph measurement.
    pub font: FontSpec,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            input_debounce: INPUT_DEBOUNCE,
            viewport_debounce: VIEWPORT_DEBOUNCE,
            cache_capacity: CACHE_CAPACITY,
            cache_ttl: CACHE_TTL,
            fallback_char_width: DEFAULT_CHAR_WIDTH,
            font: FontSpec::default(),
        }
    }
}

impl PredictionConfig {
    /// Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the master switch.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the input debounce interval.
    pub fn with_input_debounce(mut self, debounce: Duration) -> Self {
        self.input_debounce = debounce;
        self
    }

    /// Set the viewport debounce interval.
    pub fn with_viewport_debounce(mut self, debounce: Duration) -> Self {
        self.viewport_debounce = debounce;
        self
    }

    /// Set the cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the editor font.
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }
}
