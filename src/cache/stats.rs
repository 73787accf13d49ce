//! Cache Statistics Module
//!
//! Tracks store activity: read hits and misses, reaped expirations and
//! writes rejected by the admission ceiling.

use serde::Serialize;

// == Cache Stats ==
/// Tracks store activity counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of `get` calls that found a live value
    pub hits: u64,
    /// Number of `get` calls that found nothing (absent or expired)
    pub misses: u64,
    /// Number of expired entries removed, lazily or by sweep
    pub expired: u64,
    /// Number of new-key writes rejected because the store was full
    pub rejected: u64,
    /// Current number of resident entries
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the read hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expired ==
    /// Adds `count` reaped entries.
    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
