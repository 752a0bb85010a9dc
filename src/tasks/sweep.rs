//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// Reads already drop stale entries lazily; the sweep only bounds memory
/// for keys that are written once and never read again, so its interval is
/// configured much longer than the TTLs. It acquires a write lock on the
/// cache for each sweep.
///
/// # Arguments
/// * `cache` - shared reference to the cache
/// * `interval` - time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during graceful shutdown to
/// release the timer deterministically.
pub fn spawn_sweep_task<V>(cache: Arc<RwLock<TtlCache<V>>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if removed > 0 {
                info!("TTL sweep removed {} expired entries", removed);
            } else {
                debug!("TTL sweep found no expired entries");
            }
        }
    })
}
