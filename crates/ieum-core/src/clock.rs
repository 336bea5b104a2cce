//! Clock abstraction for time-dependent logic.
//!
//! The prediction cache expires entries by wall-clock age; injecting
//! the clock keeps that testable without sleeping.

use std::fmt;
use std::time::Instant;

/// Source of monotonic time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
