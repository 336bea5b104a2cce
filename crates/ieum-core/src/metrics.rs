//! Metrics collection for the prediction pipeline.
//!
//! Tracks trigger decisions, cache effectiveness, remote call volume
//! and latency, and how often suggestions are actually shown and
//! accepted.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Counters and latency estimate for the prediction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionMetrics {
    /// Contexts evaluated by the trigger policy.
    pub triggers_evaluated: u64,
    /// Contexts the trigger policy suppressed.
    pub triggers_suppressed: u64,
    /// Cache hits.
    pub cache_hits: u64,
    /// Cache misses.
    pub cache_misses: u64,
    /// Remote prediction requests issued.
    pub remote_requests: u64,
    /// Remote failures (errors and unsuccessful responses).
    pub remote_failures: u64,
    /// Results discarded because their context was superseded.
    pub stale_discarded: u64,
    /// Suggestions shown in the overlay.
    pub suggestions_shown: u64,
    /// Suggestions accepted via Tab.
    pub suggestions_applied: u64,
    /// Smoothed remote call latency (EWMA).
    #[serde(with = "duration_opt_millis")]
    pub latency_smoothed: Option<Duration>,
    /// Session start (not serialized, reset on deserialize).
    #[serde(skip, default = "Instant::now")]
    pub session_start: Instant,
}

impl Default for PredictionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionMetrics {
    /// Fresh metrics tracker.
    pub fn new() -> Self {
        Self {
            triggers_evaluated: 0,
            triggers_suppressed: 0,
            cache_hits: 0,
            cache_misses: 0,
            remote_requests: 0,
            remote_failures: 0,
            stale_discarded: 0,
            suggestions_shown: 0,
            suggestions_applied: 0,
            latency_smoothed: None,
            session_start: Instant::now(),
        }
    }

    /// Record a trigger-policy evaluation.
    pub fn record_trigger(&mut self, fired: bool) {
        self.triggers_evaluated = self.triggers_evaluated.saturating_add(1);
        if !fired {
            self.triggers_suppressed = self.triggers_suppressed.saturating_add(1);
        }
    }

    /// Record a cache lookup.
    pub fn record_cache(&mut self, hit: bool) {
        if hit {
            self.cache_hits = self.cache_hits.saturating_add(1);
        } else {
            self.cache_misses = self.cache_misses.saturating_add(1);
        }
    }

    /// Record a remote request being issued.
    pub fn record_request(&mut self) {
        self.remote_requests = self.remote_requests.saturating_add(1);
    }

    /// Record a remote failure.
    pub fn record_failure(&mut self) {
        self.remote_failures = self.remote_failures.saturating_add(1);
    }

    /// Record a stale result being discarded.
    pub fn record_stale(&mut self) {
        self.stale_discarded = self.stale_discarded.saturating_add(1);
    }

    /// Record a suggestion being shown.
    pub fn record_shown(&mut self) {
        self.suggestions_shown = self.suggestions_shown.saturating_add(1);
    }

    /// Record a suggestion being applied.
    pub fn record_applied(&mut self) {
        self.suggestions_applied = self.suggestions_applied.saturating_add(1);
    }

    /// Update the smoothed latency estimate with a new sample.
    ///
    /// EWMA: smoothed = 7/8 * smoothed + 1/8 * sample.
    pub fn record_latency(&mut self, sample: Duration) {
        self.latency_smoothed = Some(match self.latency_smoothed {
            Some(current) => {
                let current_nanos = current.as_nanos() as u64;
                let sample_nanos = sample.as_nanos() as u64;
                Duration::from_nanos((current_nanos * 7 + sample_nanos) / 8)
            }
            None => sample,
        });
    }

    /// Cache hit rate over all lookups, 0.0 when none happened.
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// Fraction of shown suggestions that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.suggestions_shown == 0 {
            0.0
        } else {
            self.suggestions_applied as f64 / self.suggestions_shown as f64
        }
    }

    /// Session duration so far.
    pub fn session_duration(&self) -> Duration {
        self.session_start.elapsed()
    }

    /// Format the latency estimate for display.
    pub fn latency_display(&self) -> String {
        self.latency_smoothed
            .map(|d| format!("{}ms", d.as_millis()))
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Serde helper for optional Duration as milliseconds.
mod duration_opt_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => d.as_millis().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<u64> = Option::deserialize(deserializer)?;
        Ok(opt.map(Duration::from_millis))
    }
}

// =============================================================================
// Tests
// =============================================================================
