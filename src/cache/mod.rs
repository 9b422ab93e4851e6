//! Cache Module
//!
//! In-memory response cache with TTL expiration, an LRU capacity bound and
//! full invalidation on writes.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default entry lifetime in seconds
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Default capacity bound
pub const DEFAULT_MAX_ENTRIES: usize = 1000;
