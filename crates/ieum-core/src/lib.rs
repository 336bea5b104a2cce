//! ieum-core: Core logic for the ieum inline text-prediction subsystem.
//!
//! This crate provides:
//! - Context extraction from editor snapshots
//! - Trigger policy deciding when a remote prediction should fire
//! - Bounded, time-expiring prediction cache
//! - Post-processing of raw model output (overlap stripping, repair)
//! - Remote predictor boundary types and trait
//! - Capability traits for clocks and text measurement
//! - Logging, metrics, and configuration

pub mod cache;
pub mod clock;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod logging;
pub mod measure;
pub mod metrics;
pub mod postprocess;
pub mod remote;
pub mod text;
pub mod trigger;

pub use cache::PredictionCache;
pub use clock::{Clock, SystemClock};
pub use config::PredictionConfig;
pub use context::{EditorSnapshot, PredictionContext};
pub use error::{Error, Result};
pub use logging::{LogFormat, init_logging};
pub use measure::{FontSpec, TextMeasurer};
pub use metrics::PredictionMetrics;
pub use remote::{PredictionRequest, PredictionResponse, Predictor};
