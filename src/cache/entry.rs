//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A memoized result with the moment it was stored.
///
/// The value is type-erased so results of different operations can share one
/// store; the memoizer that wrote it downcasts it on the way out.
#[derive(Clone)]
pub struct CacheEntry {
    /// The stored result
    value: Arc<dyn Any + Send + Sync>,
    /// When the entry was inserted
    pub inserted_at: Instant,
    /// Lifetime granted at insertion
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new<T>(value: T, ttl: Duration) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::inserted_at(value, ttl, Instant::now())
    }

    /// Creates an entry with an explicit insertion instant.
    pub fn inserted_at<T>(value: T, ttl: Duration, inserted_at: Instant) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            value: Arc::new(value),
            inserted_at,
            ttl,
        }
    }

    // == Age ==
    /// Time elapsed since insertion as seen at `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is stale at `now`.
    ///
    /// Boundary condition: an entry is stale once its age is greater than or
    /// equal to its TTL. Lookups and sweeps both use this rule.
    pub fn is_stale(&self, now: Instant) -> bool {
        self.age(now) >= self.ttl
    }

    // == Value ==
    /// Returns a clone of the value if it has type `T`.
    pub fn value<T>(&self) -> Option<T>
    where
        T: Clone + 'static,
    {
        self.value.downcast_ref::<T>().cloned()
    }
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("inserted_at", &self.inserted_at)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
