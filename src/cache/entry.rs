//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with per-insert TTLs.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Every entry carries its own TTL: successful lookups are stored for
/// longer than failed ones, so the two are never mixed up by a global
/// expiry setting.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion time
    pub created_at: Instant,
    /// Expiry time (`created_at + ttl`)
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after now.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is observably present while
    /// `now <= expires_at` and expired strictly after, so a read at the
    /// exact expiry instant still returns the value.
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining TTL, clamped to zero once expired.
    ///
    /// Useful for debugging and the stats endpoint.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
