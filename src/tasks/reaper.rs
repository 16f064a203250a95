//! Cache Reaper Task
//!
//! Background task that periodically deletes stale memoized results so the
//! store does not grow between accesses.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedStore;

/// Spawns a background task that sweeps stale entries out of `store`.
///
/// The first sweep runs one full `interval` after spawning. Each sweep takes
/// the write lock once and releases it before sleeping again, so memoized
/// calls only ever observe the store before or after a whole sweep.
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during shutdown.
///
/// # Example
/// ```ignore
/// let store = CacheStore::shared(Duration::from_secs(300));
/// let reaper = spawn_reaper_task(store.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// reaper.abort();
/// ```
pub fn spawn_reaper_task(store: SharedStore, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting cache reaper with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut store = store.write().await;
                let removed = store.sweep();
                (removed, store.len())
            };

            if removed > 0 {
                info!(removed, remaining, "Cache reaper removed stale entries");
            } else {
                debug!(remaining, "Cache reaper found no stale entries");
            }
        }
    })
}
