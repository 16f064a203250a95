//! Cache Module
//!
//! Expiring memoization for async operations: keys, entries, the shared
//! store, and the `Memoized` wrapper.

mod entry;
mod key;
mod memoize;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use key::{ArgValue, Args, CacheKey, IntoArgs};
pub use memoize::Memoized;
pub use stats::CacheStats;
pub use store::{CacheStore, SharedStore};

// == Public Constants ==
/// Default TTL in seconds when `CACHE_EXPIRY` is not set
pub const DEFAULT_TTL_SECS: u64 = 300;
