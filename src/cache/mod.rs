//! Cache Module
//!
//! Provides a byte-bounded in-memory cache with LRU eviction.

mod byteview;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use byteview::ByteView;
pub use lru::{EvictionListener, LruCache, Value};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Byte budget meaning "never evict"
pub const UNBOUNDED: usize = 0;
