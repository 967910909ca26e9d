//! Cache Module
//!
//! Provides an in-memory string cache with a single global idle timeout.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{ExpiringCache, SharedCache};
