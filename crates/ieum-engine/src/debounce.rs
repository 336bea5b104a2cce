//! Deadline-based debounce utility.
//!
//! One `Debouncer` owns one logical trigger source: re-arming pushes
//! the deadline out, and the controller polls `elapsed()` inside its
//! `select!` loop. Centralizing the timer here avoids races between
//! scattered ad-hoc delays.

use std::time::Duration;

use tokio::time::Instant;

/// Single-deadline debounce timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start (or restart) the quiet period from now.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Cancel any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Wait until the armed deadline passes.
    ///
    /// Pends forever when disarmed; guard the `select!` arm with
    /// [`Debouncer::is_armed`] so the branch is skipped instead.
    pub async fn elapsed(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.arm();

        let before = Instant::now();
        debouncer.elapsed().await;
        assert!(Instant::now() - before >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_extends_deadline() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.arm();

        tokio::time::advance(Duration::from_millis(60)).await;
        debouncer.arm();

        let before = Instant::now();
        debouncer.elapsed().await;
        // The full quiet period restarts from the second arm.
        assert!(Instant::now() - before >= Duration::from_millis(100));
    }

    #[test]
    fn armed_state_tracking() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        assert!(!debouncer.is_armed());

        debouncer.arm();
        assert!(debouncer.is_armed());

        debouncer.cancel();
        assert!(!debouncer.is_armed());
    }
}
