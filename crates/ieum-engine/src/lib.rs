//! ieum-engine: Editor-facing half of the ieum prediction subsystem.
//!
//! Provides:
//! - Caret geometry and glyph-width measurement cache
//! - Layout engine splitting a suggestion into positioned overlay lines
//! - Overlay renderer state
//! - Debounce utility and editor event types
//! - The asynchronous prediction controller driving the full pipeline

pub mod controller;
pub mod debounce;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod measure;
pub mod overlay;

pub use controller::{PredictionController, PredictionHandle};
pub use debounce::Debouncer;
pub use events::{EditorEvent, KeyAction, KeyInput, OverlayUpdate, classify_key};
pub use geometry::{CursorPosition, EditorMetrics};
pub use layout::{PredictionLine, layout};
pub use measure::{CharWidthCache, HeuristicMeasurer};
pub use overlay::{OverlayFrame, OverlayRenderer};
