//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with idle tracking.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with its value and last access time.
///
/// The value is immutable; a SET on an existing key replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    value: String,
    /// Last successful read, or creation time if never read
    last_accessed: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: String) -> Self {
        Self {
            value,
            last_accessed: Instant::now(),
        }
    }

    /// Returns the stored value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns when the entry was last read (or created).
    pub fn last_accessed(&self) -> Instant {
        self.last_accessed
    }

    // == Touch ==
    /// Refreshes the access time to now.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }

    // == Is Expired ==
    /// Checks whether the entry has been idle for strictly longer than `timeout`
    /// as of `now`.
    ///
    /// An entry idle for exactly `timeout` is still live.
    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_accessed) > timeout
    }
}
