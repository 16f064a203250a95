//! Expiring Memoizer
//!
//! Wraps an async operation so repeated calls with the same arguments inside
//! the TTL window are answered from the shared store.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheKey, IntoArgs, SharedStore};

// == Memoized ==
/// An async operation wrapped with an expiring cache.
///
/// `Ok` results are stored, including absence values such as `Ok(None)`.
/// `Err` results are returned unchanged and never stored, so the next call
/// retries the operation.
///
/// The store lock is released while the operation runs. Two identical calls
/// that overlap will both miss and both invoke the operation.
pub struct Memoized<F> {
    /// Operation identity, part of every key this wrapper produces
    name: &'static str,
    /// TTL override; `None` uses the store default
    ttl: Option<Duration>,
    store: SharedStore,
    op: F,
}

impl<F> Memoized<F> {
    // == Constructor ==
    /// Wraps `op` under the identity `name`, using the store's default TTL.
    pub fn new(name: &'static str, store: SharedStore, op: F) -> Self {
        Self {
            name,
            ttl: None,
            store,
            op,
        }
    }

    /// Overrides the TTL for results stored by this wrapper.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    // == Call ==
    /// Returns the cached result for `args` or invokes the operation.
    pub async fn call<A, T, E, Fut>(&self, args: A) -> Result<T, E>
    where
        A: IntoArgs,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Clone + Send + Sync + 'static,
    {
        let key = CacheKey::for_call(self.name, &args);

        if let Some(value) = self.store.write().await.get::<T>(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(value);
        }

        debug!(key = %key, "Cache miss, invoking operation");
        self.invoke_and_store(key, args).await
    }

    /// Invokes the operation even if a fresh entry exists, replacing it.
    ///
    /// For cached values that stopped being usable, such as a path to a file
    /// that has since been removed.
    pub async fn refresh<A, T, E, Fut>(&self, args: A) -> Result<T, E>
    where
        A: IntoArgs,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Clone + Send + Sync + 'static,
    {
        let key = CacheKey::for_call(self.name, &args);
        debug!(key = %key, "Refreshing cached result");
        self.invoke_and_store(key, args).await
    }

    async fn invoke_and_store<A, T, E, Fut>(&self, key: CacheKey, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Clone + Send + Sync + 'static,
    {
        let result = (self.op)(args).await?;

        self.store
            .write()
            .await
            .put(key, result.clone(), self.ttl);

        Ok(result)
    }
}

impl<F> std::fmt::Debug for Memoized<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoized")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
