//! Bounded, time-expiring prediction cache.
//!
//! Memoizes remote predictions keyed by (text, cursor position) so
//! revisiting the same spot does not refire the remote call. The cache
//! is an explicitly constructed object owned by whichever component
//! drives prediction; there is no global instance.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::constants::{CACHE_CAPACITY, CACHE_KEY_FULL_TEXT_LIMIT, CACHE_KEY_WINDOW, CACHE_TTL};
use crate::text::{char_len, slice_chars};

#[derive(Debug, Clone)]
struct CacheEntry {
    prediction: String,
    inserted_at: Instant,
}

/// FIFO cache of remote predictions with a per-entry TTL.
///
/// Eviction follows insertion order: when the cache is full, the oldest
/// entry goes first. Entries also expire after [`CACHE_TTL`] regardless
/// of access.
#[derive(Debug)]
pub struct PredictionCache {
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order; drives FIFO eviction.
    order: VecDeque<String>,
    capacity: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for PredictionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionCache {
    /// Create a cache with default capacity and TTL.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock (for deterministic tests).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: CACHE_CAPACITY,
            ttl: CACHE_TTL,
            clock,
        }
    }

    /// Override the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Override the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Cache key for a (text, cursor) pair.
    ///
    /// Long texts are keyed by a window around the cursor plus the
    /// offset, which bounds key size. Distant edits outside the window
    /// can therefore produce a false cache hit between two visits to
    /// the same cursor-local window; this imprecision is accepted in
    /// exchange for bounded keys.
    fn key(text: &str, cursor: usize) -> String {
        if char_len(text) <= CACHE_KEY_FULL_TEXT_LIMIT {
            format!("{text}_{cursor}")
        } else {
            let start = cursor.saturating_sub(CACHE_KEY_WINDOW);
            let window = slice_chars(text, start, cursor + CACHE_KEY_WINDOW);
            format!("{window}_{cursor}")
        }
    }

    /// Look up a cached prediction.
    ///
    /// Expired entries are evicted on access and never returned.
    pub fn get(&mut self, text: &str, cursor: usize) -> Option<String> {
        let key = Self::key(text, cursor);
        let now = self.clock.now();

        let expired = match self.entries.get(&key) {
            Some(entry) => now.duration_since(entry.inserted_at) > self.ttl,
            None => return None,
        };

        if expired {
            self.remove(&key);
            tracing::trace!(cursor, "cache entry expired");
            return None;
        }
        self.entries.get(&key).map(|e| e.prediction.clone())
    }

    /// Store a prediction, evicting the oldest entry when full.
    ///
    /// Re-inserting an existing key refreshes its value and timestamp
    /// but keeps its original position in the eviction order.
    pub fn set(&mut self, text: &str, cursor: usize, prediction: impl Into<String>) {
        let key = Self::key(text, cursor);
        let entry = CacheEntry {
            prediction: prediction.into(),
            inserted_at: self.clock.now(),
        };

        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = entry;
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, entry);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Sweep expired entries.
    pub fn cleanup(&mut self) {
        let now = self.clock.now();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.duration_since(entry.inserted_at) <= ttl);
        let live = &self.entries;
        self.order.retain(|key| live.contains_key(key));
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }
}

// =============================================================================
// Tests
// =============================================================================
