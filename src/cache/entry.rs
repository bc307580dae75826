//! Cache Entry Module
//!
//! Defines the record stored per live key, with idle-based expiration.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry with its last-access time and optional TTL.
///
/// Expiration is idle-based: the clock restarts on every access, so
/// `last_access` is a monotonic [`Instant`] rather than wall-clock time.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key, kept here so tail eviction can update the index
    pub key: K,
    /// The stored value
    pub value: V,
    /// Time of the last set/get/has touch on this entry
    pub last_access: Instant,
    /// Per-entry TTL overriding the cache-wide max age, None = use cache-wide
    pub ttl: Option<Duration>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(key: K, value: V, ttl: Option<Duration>) -> Self {
        Self {
            key,
            value,
            last_access: Instant::now(),
            ttl,
        }
    }

    // == Touch ==
    /// Resets the idle clock to now.
    pub fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    // == Is Expired ==
    /// Checks whether the entry has sat idle longer than its effective TTL.
    ///
    /// The effective TTL is the per-entry TTL if one was supplied at
    /// creation, else the cache-wide `max_age`. A zero duration on either
    /// axis disables expiration for that entry. The comparison is strictly
    /// greater-than: an entry idle for exactly its TTL is still live.
    pub fn is_expired(&self, max_age: Duration) -> bool {
        let effective = match self.ttl {
            Some(ttl) => ttl,
            None => max_age,
        };
        if effective.is_zero() {
            return false;
        }
        self.last_access.elapsed() > effective
    }
}
