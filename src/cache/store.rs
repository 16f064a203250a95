//! Cache Store Module
//!
//! Process-wide mapping from call identity to memoized result, with TTL
//! staleness checked at lookup and at sweep time.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::trace;

use crate::cache::{CacheEntry, CacheKey, CacheStats};

/// Store handle shared by every memoizer and the reaper.
pub type SharedStore = Arc<RwLock<CacheStore>>;

// == Cache Store ==
/// Memoization storage. Unbounded; entries leave only through [`sweep`].
///
/// [`sweep`]: CacheStore::sweep
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL applied when a memoizer does not supply its own
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    /// Creates an empty store already wrapped for sharing.
    pub fn shared(default_ttl: Duration) -> SharedStore {
        Arc::new(RwLock::new(Self::new(default_ttl)))
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Get ==
    /// Returns the stored value for `key` if it is fresh and of type `T`.
    ///
    /// A stale entry is left in place; the caller's next `put` overwrites it.
    pub fn get<T>(&mut self, key: &CacheKey) -> Option<T>
    where
        T: Clone + 'static,
    {
        let now = Instant::now();
        let value = self
            .entries
            .get(key)
            .filter(|entry| !entry.is_stale(now))
            .and_then(|entry| entry.value::<T>());

        match value {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores `value` under `key`, overwriting any previous entry.
    ///
    /// `ttl` falls back to the store's default when `None`.
    pub fn put<T>(&mut self, key: CacheKey, value: T, ttl: Option<Duration>)
    where
        T: Send + Sync + 'static,
    {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.put_entry(key, CacheEntry::new(value, ttl));
    }

    /// Stores a prebuilt entry, overwriting any previous entry.
    pub fn put_entry(&mut self, key: CacheKey, entry: CacheEntry) {
        trace!(key = %key, "Storing memoized result");
        self.entries.insert(key, entry);
        self.stats.record_store();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Sweep ==
    /// Removes every stale entry and returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_stale(now));

        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
