//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with per-insert TTL expiry.
//!
//! Expiry is lazy: a read that finds a stale entry removes it and reports
//! absence, whether or not the background sweep has run yet. The sweep
//! (see [`crate::tasks::spawn_sweep_task`]) only exists to bound memory for
//! keys that are written once and never read again.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};

// == TTL Cache ==
/// In-memory cache with per-insert TTLs and lazy expiry.
///
/// All operations are total: absence is reported as `None`/`false`, never
/// as an error. Eviction happens only through time expiry; there is no
/// size bound.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL applied when `set` is called without an explicit one
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates a new cache with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a value under `key`, overwriting any existing entry.
    ///
    /// The entry expires `ttl` from now (the default TTL when `None`).
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves the value for `key` if present and unexpired.
    ///
    /// This is a read with incidental cleanup, not a pure query: a stale
    /// entry found here is removed as a side effect before absence is
    /// reported, so expired keys disappear without waiting for the sweep.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// Reports whether `key` holds an unexpired value.
    ///
    /// Same freshness semantics (and cleanup side effect) as [`get`],
    /// without cloning the value or touching the hit/miss counters.
    ///
    /// [`get`]: TtlCache::get
    pub fn has(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    // == Remove ==
    /// Removes a single entry, expired or not.
    ///
    /// Returns whether an entry was present. Used for targeted
    /// invalidation when a caller forces a refresh.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Removes all entries unconditionally. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Size ==
    /// Returns the number of stored entries.
    ///
    /// Deliberately not freshness-aware: entries whose TTL has elapsed but
    /// that have not been read or swept yet are still counted.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    // == Sweep Expired ==
    /// Removes every entry whose TTL has elapsed.
    ///
    /// Returns the number of entries removed. Called periodically by the
    /// background sweep task.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in &expired_keys {
            self.entries.remove(key);
        }

        self.stats.record_expirations(count as u64);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}
