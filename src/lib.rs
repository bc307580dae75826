//! cache-lru - A bounded in-memory LRU cache
//!
//! Provides a capacity-limited key-value cache with least-recently-used
//! eviction, lazy per-entry/cache-wide TTL expiration, and an optional
//! idle auto-cleanup variant for use inside a tokio runtime.
//!
//! # Example
//! ```
//! use cache_lru::{CacheConfig, LruCache};
//!
//! let mut cache = LruCache::new(CacheConfig::with_capacity(2).unwrap()).unwrap();
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.set("c", 3); // evicts "a", the least recently used
//!
//! assert_eq!(cache.get(&"a"), None);
//! assert_eq!(cache.get(&"c"), Some(&3));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, LruCache, NodeHandle, RecencyList, SharedLruCache};
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{ConfigError, Result};
pub use tasks::spawn_idle_cleanup_task;
