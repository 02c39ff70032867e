//! Cache Module
//!
//! Bounded in-memory caching with lazy TTL expiry and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::RecencyList;
pub use stats::CacheStats;
pub use store::BoundedCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
