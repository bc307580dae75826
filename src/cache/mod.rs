//! Cache Module
//!
//! Provides bounded in-memory caching with LRU eviction, lazy TTL
//! expiration and an optional idle auto-cleanup variant.

mod entry;
mod list;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use list::{NodeHandle, RecencyList};
pub use shared::SharedLruCache;
pub use stats::CacheStats;
pub use store::LruCache;
