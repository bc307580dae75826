//! Shared Cache Module
//!
//! Concurrency-safe wrapper around [`LruCache`] for the idle auto-cleanup
//! variant. Every public method takes the inner lock for its whole body, so
//! each operation is a single critical section and the background cleanup
//! task can never interleave with one.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::cache::{CacheStats, LruCache};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::spawn_idle_cleanup_task;

// == Shared LRU Cache ==
/// An [`LruCache`] behind an `Arc<RwLock>`, with an owned idle-cleanup task
/// when `cleanup_time` is configured.
///
/// The cleanup task wipes the whole cache once no operation has touched it
/// for `cleanup_time`; any touch re-arms the window, and `clear()` leaves
/// it dormant until the next touch. Dropping the `SharedLruCache` aborts
/// the task.
#[derive(Debug)]
pub struct SharedLruCache<K, V> {
    inner: Arc<RwLock<LruCache<K, V>>>,
    cleanup: Option<JoinHandle<()>>,
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a shared cache, spawning the idle-cleanup task if the
    /// configuration enables one.
    ///
    /// Must be called from within a tokio runtime when `cleanup_time` is
    /// non-zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        let cleanup_time = config.cleanup_time;
        let inner = Arc::new(RwLock::new(LruCache::new(config)?));
        let cleanup = if cleanup_time.is_zero() {
            None
        } else {
            Some(spawn_idle_cleanup_task(Arc::clone(&inner)))
        };
        Ok(Self { inner, cleanup })
    }

    // == Operations ==
    /// Stores a key-value pair. See [`LruCache::set`].
    pub async fn set(&self, key: K, value: V) {
        self.inner.write().await.set(key, value);
    }

    /// Stores a key-value pair with a per-entry TTL. See
    /// [`LruCache::set_with_ttl`].
    pub async fn set_with_ttl(&self, key: K, value: V, ttl: Option<Duration>) {
        self.inner.write().await.set_with_ttl(key, value, ttl);
    }

    /// Retrieves a value, refreshing its recency. See [`LruCache::get`].
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.write().await.get(key).cloned()
    }

    /// Checks presence and freshness. See [`LruCache::has`].
    pub async fn has(&self, key: &K) -> bool {
        self.inner.write().await.has(key)
    }

    /// Removes an entry. See [`LruCache::remove`].
    pub async fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().await.remove(key)
    }

    /// Empties the cache and leaves the idle window dormant until the next
    /// touch. See [`LruCache::clear`].
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Current number of live entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Live keys in insertion-derived order.
    pub async fn keys(&self) -> Vec<K> {
        self.inner.read().await.keys()
    }

    /// Live values in insertion-derived key order, lazily dropping entries
    /// that just expired.
    pub async fn values(&self) -> Vec<V> {
        self.inner.write().await.values()
    }

    /// Current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    // == Sharing ==
    /// Clones the shared handle to the inner cache, e.g. for use from other
    /// tasks.
    pub fn inner(&self) -> Arc<RwLock<LruCache<K, V>>> {
        Arc::clone(&self.inner)
    }
}

impl<K, V> Drop for SharedLruCache<K, V> {
    fn drop(&mut self) {
        if let Some(handle) = &self.cleanup {
            handle.abort();
        }
    }
}
