//! Cache Store Module
//!
//! Main cache engine combining a key index with the recency list, capacity
//! eviction and lazy TTL expiration.

use std::hash::Hash;
use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::cache::{CacheEntry, CacheStats, NodeHandle, RecencyList};
use crate::config::CacheConfig;
use crate::error::Result;

// == LRU Cache ==
/// Bounded in-memory cache with LRU eviction and lazy expiration.
///
/// The cache is the sole owner of both the key index and the recency list;
/// node handles never escape. The index maps each key to its list node and
/// stays a bijection with the list at all times. The list is ordered from
/// least recently used (tail) to most recently used (head); every `set`,
/// `get` or successful `has` moves the touched entry to the head.
///
/// Lookups are not read-only: `get` and `has` refresh the entry's recency
/// and idle clock, and lazily remove the entry if it turned out to be
/// expired.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Fixed construction-time configuration
    config: CacheConfig,
    /// Key -> list node, insertion-ordered for keys/values snapshots
    index: IndexMap<K, NodeHandle>,
    /// Recency order, tail = LRU, head = MRU
    list: RecencyList<CacheEntry<K, V>>,
    /// Performance counters
    stats: CacheStats,
    /// When true, clear() walks and unlinks every node individually
    references_cleanup: bool,
    /// Last touch, Some = idle-cleanup window armed
    last_touch: Option<Instant>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new cache from a validated configuration.
    ///
    /// # Errors
    /// Fails fast with [`ConfigError::ZeroCapacity`](crate::ConfigError) if
    /// the configured capacity is zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let capacity = config.capacity;
        Ok(Self {
            config,
            index: IndexMap::with_capacity(capacity),
            list: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            references_cleanup: false,
            last_touch: None,
        })
    }

    // == Set ==
    /// Stores a key-value pair without a per-entry TTL.
    ///
    /// An existing key keeps any per-entry TTL it was created with.
    pub fn set(&mut self, key: K, value: V) {
        self.set_with_ttl(key, value, None);
    }

    /// Stores a key-value pair, optionally with a per-entry TTL that
    /// overrides the cache-wide `max_age` for this entry.
    ///
    /// If the key already exists, the value is updated in place and the
    /// entry is refreshed (moved to the recency head, idle clock reset);
    /// the stored TTL is replaced only when one is supplied here. If the
    /// key is new and the cache is at capacity, the least recently used
    /// entry is evicted first, so the size never exceeds capacity.
    pub fn set_with_ttl(&mut self, key: K, value: V, ttl: Option<Duration>) {
        if let Some(&handle) = self.index.get(&key) {
            let entry = self.list.get_mut(handle);
            entry.value = value;
            if ttl.is_some() {
                entry.ttl = ttl;
            }
            entry.touch();
            self.list.move_to_head(handle);
            self.note_touch();
            return;
        }

        // At capacity: evict the current tail before inserting
        if self.index.len() == self.config.capacity {
            if let Some(evicted) = self.list.remove_from_tail() {
                self.index.shift_remove(&evicted.key);
                self.stats.record_eviction();
            }
        }

        let handle = self.list.append(CacheEntry::new(key.clone(), value, ttl));
        self.index.insert(key, handle);
        self.stats.set_total_entries(self.index.len());
        self.note_touch();
    }

    // == Get ==
    /// Retrieves the value for a key, refreshing its recency.
    ///
    /// Returns `None` if the key is absent or turned out to be expired (in
    /// which case it has been lazily removed).
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.has(key) {
            return None;
        }
        let &handle = self.index.get(key)?;
        Some(&self.list.get(handle).value)
    }

    // == Has ==
    /// Checks whether a key is present and fresh.
    ///
    /// A present-but-expired key is lazily removed from both list and index
    /// and reported as absent. A fresh key has its recency and idle clock
    /// refreshed as part of the check.
    pub fn has(&mut self, key: &K) -> bool {
        let Some(&handle) = self.index.get(key) else {
            self.stats.record_miss();
            return false;
        };

        if self.list.get(handle).is_expired(self.config.max_age) {
            self.list.remove(handle);
            self.index.shift_remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.index.len());
            return false;
        }

        self.list.get_mut(handle).touch();
        self.list.move_to_head(handle);
        self.stats.record_hit();
        self.note_touch();
        true
    }

    // == Remove ==
    /// Removes an entry, returning its value.
    ///
    /// Silent no-op (returns `None`) if the key is absent. Unlike lookups,
    /// removal refreshes nothing.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.index.shift_remove(key)?;
        let entry = self.list.remove(handle);
        self.stats.set_total_entries(self.index.len());
        Some(entry.value)
    }

    // == Clear ==
    /// Empties the cache and disarms the idle-cleanup window until the
    /// next touch.
    ///
    /// With references cleanup enabled the list is walked and every node
    /// unlinked individually; otherwise the backing arena is discarded
    /// wholesale. The two differ only in how eagerly internal references
    /// are dropped, never in observable behavior.
    pub fn clear(&mut self) {
        self.index.clear();
        if self.references_cleanup {
            self.list.clear();
        } else {
            self.list.reset();
        }
        self.last_touch = None;
        self.stats.set_total_entries(0);
    }

    // == References Cleanup Mode ==
    /// Makes `clear()` walk the list and unlink every node individually.
    pub fn enable_references_cleanup(&mut self) {
        self.references_cleanup = true;
    }

    /// Makes `clear()` discard the list wholesale (the default).
    pub fn disable_references_cleanup(&mut self) {
        self.references_cleanup = false;
    }

    // == Length ==
    /// Returns the current number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Snapshots ==
    /// Returns the live keys in insertion-derived order.
    ///
    /// Diagnostic O(n) snapshot; does not re-check expiration and does not
    /// refresh recency.
    pub fn keys(&self) -> Vec<K> {
        self.index.keys().cloned().collect()
    }

    /// Returns the live values in insertion-derived key order.
    ///
    /// Diagnostic O(n) snapshot; each key is re-checked through `get`, so
    /// entries that just expired are lazily removed and omitted, and every
    /// surviving entry's recency is refreshed.
    pub fn values(&mut self) -> Vec<V>
    where
        V: Clone,
    {
        let keys = self.keys();
        keys.iter().filter_map(|key| self.get(key).cloned()).collect()
    }

    // == Config Accessors ==
    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Cache-wide maximum idle age; zero = expiration disabled.
    pub fn max_age(&self) -> Duration {
        self.config.max_age
    }

    /// Idle window for whole-cache auto-cleanup; zero = disabled.
    pub fn cleanup_time(&self) -> Duration {
        self.config.cleanup_time
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Idle Deadline ==
    /// Deadline at which the idle-cleanup task should wipe the cache, or
    /// `None` while the window is dormant (cleanup disabled, never touched,
    /// or cleared since the last touch).
    pub fn idle_deadline(&self) -> Option<Instant> {
        if self.config.cleanup_time.is_zero() {
            return None;
        }
        self.last_touch.map(|t| t + self.config.cleanup_time)
    }

    /// Arms the idle-cleanup window. Called on every set and on every
    /// recency refresh inside has/get.
    fn note_touch(&mut self) {
        if !self.config.cleanup_time.is_zero() {
            self.last_touch = Some(Instant::now());
        }
    }

    /// Index/list bijection check, used by the property suite.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.index.len(), self.list.len(), "index/list size mismatch");
        for (key, &handle) in &self.index {
            assert!(
                self.list.get(handle).key == *key,
                "index entry does not point at its own list node"
            );
        }
    }
}
