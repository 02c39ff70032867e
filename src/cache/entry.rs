//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with their expiry deadline.

use std::time::{Duration, Instant};

use crate::value::CacheValue;

// == Cache Entry ==
/// A single cache entry: the stored value plus its expiry deadline.
///
/// Entries are owned exclusively by the cache and never handed out; `get`
/// returns a clone of the value.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored, already-coerced value
    pub value: CacheValue,
    /// Deadline after which the entry is logically absent
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl` from now.
    pub fn new(value: CacheValue, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks expiry against an explicit clock reading.
    ///
    /// Boundary condition: an entry is expired only when `now` is strictly
    /// later than `expires_at`. An entry read at exactly its deadline is
    /// still valid, so the full TTL window is usable.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    /// Checks expiry against the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining time until expiry, zero if already expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
