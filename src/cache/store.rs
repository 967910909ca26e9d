//! Cache Store Module
//!
//! String-keyed cache with a single global idle timeout. Expired entries are
//! removed by [`ExpiringCache::cleanup_expired`], which the background sweep
//! task calls once per interval; reads never expire entries themselves.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

/// Handle to the cache shared by client tasks and the sweep task.
///
/// A GET takes the write lock because it refreshes the entry's access time,
/// which keeps read-and-touch atomic with respect to a concurrent sweep.
pub type SharedCache = Arc<RwLock<ExpiringCache>>;

// == Expiring Cache ==
/// In-memory key-value store with idle-timeout expiry.
#[derive(Debug)]
pub struct ExpiringCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Read and sweep counters
    stats: CacheStats,
    /// Idle duration after which an entry becomes eligible for removal
    timeout: Duration,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates an empty cache whose entries expire after `timeout` without a read.
    pub fn new(timeout: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            timeout,
        }
    }

    /// Wraps the cache into a [`SharedCache`] handle.
    pub fn shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    /// Returns the idle timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // == Get ==
    /// Returns the value for `key` and refreshes its access time.
    ///
    /// Absence is not an error: a missing or already-swept key yields `None`.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch();
                self.stats.record_hit();
                Some(entry.value().to_string())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or wholesale-replaces the entry for `key`, stamped with the current time.
    pub fn set(&mut self, key: String, value: String) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Delete ==
    /// Removes the entry for `key`. Deleting an absent key is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes every entry idle for longer than the timeout.
    ///
    /// The cutoff is computed once, after the caller holds the lock, so an entry
    /// touched before this call can never be judged by a stale timestamp.
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let timeout = self.timeout;
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now, timeout));

        let removed = before - self.entries.len();
        self.stats.record_evictions(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
