//! Shared Cache Module
//!
//! Thread-safe wrapper for concurrent deployments. `get` mutates cache state
//! (recency reordering, lazy expiry removal), so it is not a pure read: every
//! operation takes the one mutex guarding the entry map and the recency list
//! together, keeping eviction-on-insert and expiry-on-read atomic with the
//! lookup that triggers them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{BoundedCache, CacheStats};
use crate::error::Result;
use crate::value::CacheValue;

// == Shared Cache ==
/// Cloneable handle to a mutex-protected [`BoundedCache`].
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<Mutex<BoundedCache>>,
}

impl SharedCache {
    /// Wraps a cache for shared use.
    pub fn new(cache: BoundedCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Stores a key-value pair. See [`BoundedCache::set`].
    pub fn set(&self, key: &str, raw: &str) -> Result<()> {
        self.lock().set(key, raw)
    }

    /// Retrieves a copy of the value stored under `key`. See
    /// [`BoundedCache::get`].
    pub fn get(&self, key: &str) -> Option<CacheValue> {
        self.lock().get(key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a snapshot of the traffic counters.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    // The cache holds no invariant that a panicked holder could have broken
    // half-way that a later caller cannot tolerate; recover from poisoning.
    fn lock(&self) -> MutexGuard<'_, BoundedCache> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
