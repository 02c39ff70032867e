//! Cache Statistics Module
//!
//! Observational counters for cache traffic. Nothing in the cache's behavior
//! depends on these; they exist for caller-side reporting.

use serde::Serialize;

// == Cache Stats ==
/// Counters for cache traffic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Successful retrievals of live entries
    pub hits: u64,
    /// Failed retrievals (absent or expired)
    pub misses: u64,
    /// Entries purged lazily because their TTL had elapsed
    pub expirations: u64,
    /// Entries evicted by the LRU policy
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any retrieval.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
