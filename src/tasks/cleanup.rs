//! Idle Sweep Task
//!
//! Background task that periodically removes cache entries idle for longer
//! than the cache timeout.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that sweeps idle cache entries every `interval`.
///
/// The first sweep runs one full interval after spawning. With the interval
/// equal to the cache timeout, an untouched entry is gone no later than two
/// timeouts after its last access.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = ExpiringCache::new(Duration::from_secs(300)).shared();
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting idle sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let (removed, stats) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup_expired();
                (removed, cache_guard.stats())
            };

            if removed > 0 {
                info!(
                    "Idle sweep: removed {} expired entries ({} remaining, {} evicted total, hit rate {:.2})",
                    removed,
                    stats.total_entries,
                    stats.evictions,
                    stats.hit_rate()
                );
            } else {
                debug!("Idle sweep: no expired entries found");
            }
        }
    })
}
