//! Bounded Cache - an in-memory cache with LRU eviction and TTL expiry
//!
//! Stores up to `max_size` entries, each expiring a fixed TTL after its last
//! write. Inserting past capacity evicts the least-recently-used entry;
//! expired entries are purged lazily on access, with no background sweeper.
//! Every write passes through a coercion layer converting raw text into the
//! cache's single configured value type (text, integer, float, boolean, or a
//! caller-registered custom type).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use bounded_cache::BoundedCache;
//!
//! let mut cache = BoundedCache::new(2, Duration::from_secs(60));
//! cache.set("user:1", "alice").unwrap();
//!
//! let value = cache.get("user:1").unwrap();
//! assert_eq!(value.as_text(), Some("alice"));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod sync;
pub mod value;

pub use cache::{BoundedCache, CacheStats, MAX_KEY_LENGTH};
pub use config::{CacheConfig, ConfigWarning, DEFAULT_MAX_SIZE, DEFAULT_TTL_SECS};
pub use error::{CacheError, Result};
pub use sync::SharedCache;
pub use value::{CacheValue, CustomValue, TypeRegistry, ValueCoercer};
