//! Cache Store Module
//!
//! The bounded cache engine: HashMap storage combined with recency tracking
//! for LRU eviction and lazy per-entry TTL expiry.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyList, MAX_KEY_LENGTH};
use crate::config::{CacheConfig, ConfigWarning, Settings};
use crate::error::{CacheError, Result};
use crate::value::{CacheValue, TypeRegistry, ValueCoercer};

// == Bounded Cache ==
/// Bounded in-memory cache with LRU eviction and per-entry TTL expiry.
///
/// Holds at most `max_size` entries; inserting beyond that evicts the least
/// recently used entry. Each entry expires `ttl` after its last write, and
/// expired entries are purged lazily by whichever `get` next touches them —
/// there is no background sweeper. Capacity, TTL and value type are frozen
/// at construction.
///
/// Note that `get` mutates (recency reordering, lazy expiry), so concurrent
/// use requires exclusive access; see [`SharedCache`](crate::sync::SharedCache).
#[derive(Debug)]
pub struct BoundedCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Keys ordered by recency of last successful access
    recency: RecencyList,
    /// Traffic counters
    stats: CacheStats,
    /// Frozen capacity, TTL and coercion policy
    settings: Settings,
    /// Corrections applied during configuration validation
    warnings: Vec<ConfigWarning>,
}

impl BoundedCache {
    // == Constructors ==
    /// Creates a cache storing text values.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries the cache can hold
    /// * `ttl` - Time-to-live applied to every entry from its last write
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self::with_coercer(max_size, ttl, ValueCoercer::Text)
    }

    /// Creates a cache with a directly supplied coercion policy.
    pub fn with_coercer(max_size: usize, ttl: Duration, coercer: ValueCoercer) -> Self {
        Self::from_settings(
            Settings {
                max_size,
                ttl,
                coercer,
            },
            Vec::new(),
        )
    }

    /// Creates a cache from a raw configuration mapping.
    ///
    /// Negative `ttl`/`max_size` are corrected to the defaults (observable
    /// via [`config_warnings`](Self::config_warnings)); an unknown
    /// `value_type` name fails here, before any entry exists.
    pub fn from_config(config: &CacheConfig, registry: &TypeRegistry) -> Result<Self> {
        let (settings, warnings) = config.validate(registry)?;
        Ok(Self::from_settings(settings, warnings))
    }

    fn from_settings(settings: Settings, warnings: Vec<ConfigWarning>) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            settings,
            warnings,
        }
    }

    // == Set ==
    /// Stores a key-value pair, coercing the raw text to the configured type.
    ///
    /// An existing key is overwritten in place (value and TTL reset, moved to
    /// most recently used; the entry count does not change). A new key is
    /// inserted at the most-recently-used position; if that pushes the cache
    /// over capacity, exactly one least-recently-used entry is evicted.
    ///
    /// # Errors
    /// * [`CacheError::InvalidKey`] - key is empty or over-long
    /// * [`CacheError::ValueConversionFailed`] - raw text does not parse as
    ///   the configured type; cache state is left untouched
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key exceeds maximum length of {MAX_KEY_LENGTH} bytes"
            )));
        }

        // Coercion runs before any mutation; a failed set changes nothing.
        let value = self.settings.coercer.coerce(raw)?;

        let entry = CacheEntry::new(value, self.settings.ttl);
        let replaced = self.entries.insert(key.to_string(), entry).is_some();
        self.recency.promote(key);

        // A new key can push the cache one over capacity; a single eviction
        // restores the bound. With max_size == 0 the victim is the key that
        // was just inserted, so nothing is ever retrievable.
        if !replaced && self.entries.len() > self.settings.max_size {
            if let Some(victim) = self.recency.pop_lru() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!(key = %victim, "evicted least recently used entry");
            }
        }

        Ok(())
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// Returns `None` for absent keys and for expired entries; an expired
    /// entry is removed on observation, making it indistinguishable from an
    /// absent one. Only a successful retrieval of a live entry refreshes its
    /// recency position.
    pub fn get(&mut self, key: &str) -> Option<CacheValue> {
        let entry = match self.entries.get(key) {
            Some(entry) => entry,
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if entry.is_expired() {
            // Lazy expiry: purge on observation, leave everyone else's
            // recency position alone.
            self.entries.remove(key);
            self.recency.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(key, "removed expired entry");
            return None;
        }

        let value = entry.value.clone();
        self.recency.promote(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Accessors ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn max_size(&self) -> usize {
        self.settings.max_size
    }

    /// Returns the per-entry time-to-live.
    pub fn ttl(&self) -> Duration {
        self.settings.ttl
    }

    /// Returns the name of the configured value type.
    pub fn value_type(&self) -> &str {
        self.settings.coercer.type_name()
    }

    /// Returns the corrections applied during configuration validation.
    pub fn config_warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Returns a snapshot of the traffic counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn text_cache(max_size: usize) -> BoundedCache {
        BoundedCache::new(max_size, Duration::from_secs(300))
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = text_cache(100);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.value_type(), "text");
        assert!(cache.config_warnings().is_empty());
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let mut cache = text_cache(100);

        cache.set("key1", "value1").unwrap();

        assert_eq!(cache.get("key1"), Some(CacheValue::Text("value1".into())));
        assert_eq!(cache.get("key2"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite_replaces_value_without_growth() {
        let mut cache = text_cache(100);

        cache.set("key1", "old").unwrap();
        cache.set("key1", "new").unwrap();

        assert_eq!(cache.get("key1"), Some(CacheValue::Text("new".into())));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_empty_key_rejected_before_mutation() {
        let mut cache = text_cache(100);

        let result = cache.set("", "value");
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overlong_key_rejected() {
        let mut cache = text_cache(100);
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = cache.set(&long_key, "value");
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_get_empty_key_is_plain_absence() {
        let mut cache = text_cache(100);
        assert_eq!(cache.get(""), None);
    }

    #[test]
    fn test_lru_eviction_at_capacity() {
        let mut cache = text_cache(2);

        cache.set("a", "1").unwrap();
        cache.set("b", "2").unwrap();
        cache.set("c", "3").unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(CacheValue::Text("2".into())));
        assert_eq!(cache.get("c"), Some(CacheValue::Text("3".into())));
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = text_cache(2);

        cache.set("a", "1").unwrap();
        cache.set("b", "2").unwrap();
        cache.get("a").unwrap();
        cache.set("c", "3").unwrap();

        assert_eq!(cache.get("a"), Some(CacheValue::Text("1".into())));
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("c"), Some(CacheValue::Text("3".into())));
    }

    #[test]
    fn test_overwrite_refreshes_recency() {
        let mut cache = text_cache(2);

        cache.set("a", "1").unwrap();
        cache.set("b", "2").unwrap();
        // Rewriting "a" makes "b" the eviction victim
        cache.set("a", "1b").unwrap();
        cache.set("c", "3").unwrap();

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(CacheValue::Text("1b".into())));
    }

    #[test]
    fn test_failed_get_does_not_refresh_recency() {
        let mut cache = text_cache(2);

        cache.set("a", "1").unwrap();
        cache.set("b", "2").unwrap();
        // Miss on an absent key must not disturb the order
        assert_eq!(cache.get("missing"), None);
        cache.set("c", "3").unwrap();

        assert_eq!(cache.get("a"), None);
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut cache = text_cache(0);

        cache.set("a", "1").unwrap();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_ttl_expiry_and_reset() {
        let mut cache = BoundedCache::new(100, Duration::from_millis(50));

        cache.set("k", "v").unwrap();
        assert!(cache.get("k").is_some());

        sleep(Duration::from_millis(80));
        assert_eq!(cache.get("k"), None);

        // A fresh write makes the key retrievable again
        cache.set("k", "v2").unwrap();
        assert_eq!(cache.get("k"), Some(CacheValue::Text("v2".into())));
    }

    #[test]
    fn test_lazy_expiry_is_idempotent_absence() {
        let mut cache = BoundedCache::new(100, Duration::from_millis(20));

        cache.set("k", "v").unwrap();
        sleep(Duration::from_millis(50));

        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
        // Asking again before any other write still reports absence
        assert_eq!(cache.get("k"), None);

        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    fn test_conversion_failure_leaves_state_unchanged() {
        let mut cache =
            BoundedCache::with_coercer(100, Duration::from_secs(300), ValueCoercer::Integer);

        cache.set("k", "10").unwrap();
        let err = cache.set("k", "abc").unwrap_err();

        assert_eq!(
            err,
            CacheError::ValueConversionFailed {
                expected_type: "integer".to_string()
            }
        );
        // The earlier value survives the failed write
        assert_eq!(cache.get("k"), Some(CacheValue::Integer(10)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_conversion_failure_on_fresh_key_writes_nothing() {
        let mut cache =
            BoundedCache::with_coercer(100, Duration::from_secs(300), ValueCoercer::Integer);

        assert!(cache.set("k", "abc").is_err());
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config = CacheConfig {
            ttl: Some(2),
            max_size: Some(2),
            value_type: Some("int".to_string()),
        };
        let mut cache = BoundedCache::from_config(&config, &TypeRegistry::new()).unwrap();

        assert_eq!(cache.ttl(), Duration::from_secs(2));
        assert_eq!(cache.max_size(), 2);
        assert_eq!(cache.value_type(), "integer");

        cache.set("key1", "10").unwrap();
        cache.set("key2", "20").unwrap();
        cache.set("key3", "30").unwrap();

        assert_eq!(cache.get("key1"), None);
        assert_eq!(cache.get("key2"), Some(CacheValue::Integer(20)));
        assert_eq!(cache.get("key3"), Some(CacheValue::Integer(30)));
    }

    #[test]
    fn test_from_config_corrects_negative_values() {
        let config = CacheConfig {
            ttl: Some(-10),
            max_size: Some(-5),
            value_type: None,
        };
        let cache = BoundedCache::from_config(&config, &TypeRegistry::new()).unwrap();

        assert_eq!(cache.ttl(), Duration::from_secs(60));
        assert_eq!(cache.max_size(), 100);
        assert_eq!(cache.config_warnings().len(), 2);
    }

    #[test]
    fn test_from_config_unknown_type_fails_fast() {
        let config = CacheConfig {
            ttl: None,
            max_size: None,
            value_type: Some("Widget".to_string()),
        };
        let result = BoundedCache::from_config(&config, &TypeRegistry::new());
        assert_eq!(
            result.unwrap_err(),
            CacheError::UnknownValueType("Widget".to_string())
        );
    }

    #[test]
    fn test_stats_track_traffic() {
        let mut cache = text_cache(2);

        cache.set("a", "1").unwrap();
        cache.get("a").unwrap(); // hit
        assert_eq!(cache.get("missing"), None); // miss
        cache.set("b", "2").unwrap();
        cache.set("c", "3").unwrap(); // evicts "a"

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }
}
