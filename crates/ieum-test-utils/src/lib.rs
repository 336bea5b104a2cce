//! ieum-test-utils: Test infrastructure for the prediction subsystem.
//!
//! Provides:
//! - ManualClock: hand-advanced clock for TTL testing
//! - MockPredictor: scripted remote predictor without a network
//! - FixedMeasurer: deterministic glyph measurement

mod fixed_measurer;
mod manual_clock;
mod mock_predictor;

pub use fixed_measurer::FixedMeasurer;
pub use manual_clock::ManualClock;
pub use mock_predictor::MockPredictor;
