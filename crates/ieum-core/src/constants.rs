//! Tuning constants for the prediction subsystem.

use std::time::Duration;

// =============================================================================
// Trigger Policy Constants
// =============================================================================

/// Minimum trimmed characters before the cursor to consider predicting.
pub const MIN_CONTEXT_CHARS: usize = 5;

/// Maximum characters before the cursor sent to the remote model.
pub const MAX_CONTEXT_CHARS: usize = 2000;

/// Length of a trailing whitespace or symbol run that suppresses prediction.
pub const MAX_TRAILING_RUN: usize = 3;

/// Characters that, when last typed, suppress prediction until closed.
pub const OPENING_CHARS: [char; 6] = ['(', '[', '{', '"', '\'', '`'];

// =============================================================================
// Cache Constants
// =============================================================================

/// Maximum number of cached predictions (oldest evicted on overflow).
pub const CACHE_CAPACITY: usize = 50;

/// Time-to-live for a cached prediction.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Texts longer than this are keyed by a cursor-local window.
pub const CACHE_KEY_FULL_TEXT_LIMIT: usize = 200;

/// Characters kept on each side of the cursor in windowed cache keys.
pub const CACHE_KEY_WINDOW: usize = 100;

// =============================================================================
// Post-processing Constants
// =============================================================================

/// Minimum characters for a trailing token to survive fragment cleanup.
pub const MIN_TOKEN_CHARS: usize = 2;

// =============================================================================
// Layout Constants
// =============================================================================

/// Maximum overlay lines rendered; overflow text is dropped.
pub const MAX_PREDICTION_LINES: usize = 3;

/// Multi-script probe string used to measure average glyph width.
pub const MEASUREMENT_PROBE: &str = "가나다라마바사아자차ABCDEFGabcdefg0123456789";

/// Conservative character width (pixels) when measurement fails.
pub const DEFAULT_CHAR_WIDTH: f64 = 8.0;

// =============================================================================
// Timing Constants
// =============================================================================

/// Debounce applied to editor content/selection updates.
pub const INPUT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounce applied to viewport resize/scroll events.
pub const VIEWPORT_DEBOUNCE: Duration = Duration::from_millis(100);
