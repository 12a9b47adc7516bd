//! Cache Module
//!
//! Provides the bounded in-memory result cache with LRU eviction.

mod entry;
mod key;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CachedValue;
pub use key::{derive_key, APPLICABLE_PREFIX, VALIDATE_PREFIX};
pub use lru::{Keys, LruList};
pub use stats::CacheStats;
pub use store::BoundedCache;
