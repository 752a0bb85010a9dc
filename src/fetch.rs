//! Fetch Orchestrator
//!
//! Composes the TTL cache with the request scheduler: cached outcomes are
//! served without touching the network, misses go through the scheduler
//! and the outcome is cached either way.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::error::Result;
use crate::scheduler::RequestScheduler;

// == Cached Fetcher ==
/// Cache-first, rate-limited lookup orchestration.
///
/// Outcomes are cached as `Option<V>`: `Some` for a successful lookup
/// (success TTL) and `None` for a failed one (shorter failure TTL), so
/// repeated failures do not hammer the upstream API but are retried
/// reasonably soon.
pub struct CachedFetcher<V> {
    cache: Arc<RwLock<TtlCache<Option<V>>>>,
    scheduler: RequestScheduler,
    success_ttl: Duration,
    failure_ttl: Duration,
}

impl<V: Clone + Send + 'static> CachedFetcher<V> {
    // == Constructor ==
    /// Creates a new fetcher over a shared cache and scheduler.
    pub fn new(
        cache: Arc<RwLock<TtlCache<Option<V>>>>,
        scheduler: RequestScheduler,
        success_ttl: Duration,
        failure_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            scheduler,
            success_ttl,
            failure_ttl,
        }
    }

    // == Fetch With Cache ==
    /// Returns the outcome for `key`, from cache when fresh.
    ///
    /// On a miss, `op` is submitted through the scheduler (one attempt per
    /// logical call) and the outcome is cached before being returned. A
    /// cached `None` is itself a hit: the failure is not retried until its
    /// TTL elapses. Batch callers simply issue these concurrently; the
    /// scheduler is the sole point of rate enforcement.
    pub async fn fetch_with_cache<F, Fut>(&self, key: &str, op: F) -> Option<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        if let Some(outcome) = self.cache.write().await.get(key) {
            debug!(key, "cache hit");
            return outcome;
        }

        debug!(key, "cache miss, scheduling upstream lookup");

        let outcome = match self.scheduler.submit(op).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "upstream lookup failed");
                None
            }
        };

        let ttl = if outcome.is_some() {
            self.success_ttl
        } else {
            self.failure_ttl
        };
        self.cache
            .write()
            .await
            .set(key.to_string(), outcome.clone(), Some(ttl));

        outcome
    }

    // == Invalidate ==
    /// Drops the cached outcome for `key`, forcing the next fetch to go
    /// upstream.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.cache.write().await.remove(key)
    }

    // == Accessors ==
    /// Current cache statistics.
    pub async fn cache_stats(&self) -> crate::cache::CacheStats {
        self.cache.read().await.stats()
    }

    /// Unconditionally flushes the cache.
    pub async fn flush_cache(&self) {
        self.cache.write().await.clear();
    }

    /// Number of lookups waiting for admission.
    pub async fn queue_len(&self) -> usize {
        self.scheduler.queue_len().await
    }
}
