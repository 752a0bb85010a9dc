//! Team Stats Service
//!
//! The domain facade the website calls: per-player lookups, roster-wide
//! batches, totals, force refresh, and cache administration. All rate
//! limiting and caching happens underneath, in the fetcher.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::info;

use crate::cache::CacheStats;
use crate::fetch::CachedFetcher;
use crate::models::PlayerStats;
use crate::upstream::StatsApi;

/// Cache key for a player's stats.
fn player_cache_key(name: &str) -> String {
    format!("player_stats_{name}")
}

// == Team Stats Service ==
/// Orchestrated access to the team's player statistics.
///
/// Constructed once at process start and shared behind an `Arc`; tests
/// build isolated instances with their own cache and scheduler.
pub struct TeamStatsService {
    fetcher: CachedFetcher<PlayerStats>,
    api: Arc<StatsApi>,
    roster: Vec<String>,
}

impl TeamStatsService {
    // == Constructor ==
    /// Creates a new service for the given roster.
    pub fn new(fetcher: CachedFetcher<PlayerStats>, api: Arc<StatsApi>, roster: Vec<String>) -> Self {
        Self {
            fetcher,
            api,
            roster,
        }
    }

    /// The configured roster.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Whether `name` belongs to the roster.
    pub fn is_roster_member(&self, name: &str) -> bool {
        self.roster.iter().any(|member| member == name)
    }

    // == Player Stats ==
    /// Stats for one player, from cache when fresh.
    ///
    /// `None` means "currently unavailable": the upstream lookup failed or
    /// found nothing, and the negative outcome is cached briefly so the
    /// API is not hammered by retries.
    pub async fn player_stats(&self, name: &str) -> Option<PlayerStats> {
        let api = Arc::clone(&self.api);
        let player = name.to_string();
        self.fetcher
            .fetch_with_cache(&player_cache_key(name), move || async move {
                api.player_stats(&player).await
            })
            .await
    }

    // == Team Stats ==
    /// Stats for the whole roster.
    ///
    /// Issues one concurrent lookup per member and lets the scheduler
    /// enforce the rate limit; the service never throttles on its own.
    pub async fn team_stats(&self) -> HashMap<String, Option<PlayerStats>> {
        let lookups = self.roster.iter().map(|name| async move {
            (name.clone(), self.player_stats(name).await)
        });

        join_all(lookups).await.into_iter().collect()
    }

    // == Refresh Player ==
    /// Drops the cached outcome for one player and fetches fresh stats.
    pub async fn refresh_player(&self, name: &str) -> Option<PlayerStats> {
        info!(player = name, "force refreshing stats");
        self.fetcher.invalidate(&player_cache_key(name)).await;
        self.player_stats(name).await
    }

    // == Preload ==
    /// Warms the cache with the whole roster's stats.
    pub async fn preload(&self) {
        info!("preloading team stats");
        let team = self.team_stats().await;
        let available = team.values().filter(|stats| stats.is_some()).count();
        info!(
            available,
            roster = team.len(),
            "team stats preloaded"
        );
    }

    // == Cache Administration ==
    /// Current cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.fetcher.cache_stats().await
    }

    /// Unconditionally flushes the cache.
    pub async fn flush_cache(&self) {
        self.fetcher.flush_cache().await;
        info!("cache flushed");
    }

    /// Number of lookups queued behind the rate window.
    pub async fn queued_lookups(&self) -> usize {
        self.fetcher.queue_len().await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::models::player::sample_stats;
    use crate::scheduler::RequestScheduler;
    use std::time::Duration;
    use tokio::sync::RwLock;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_service(server: &MockServer, roster: &[&str]) -> TeamStatsService {
        let cache = Arc::new(RwLock::new(TtlCache::new(Duration::from_secs(60))));
        let scheduler =
            RequestScheduler::new(3, Duration::from_millis(300), Duration::from_millis(10));
        let fetcher = CachedFetcher::new(
            cache,
            scheduler,
            Duration::from_secs(60),
            Duration::from_millis(100),
        );
        let api = Arc::new(StatsApi::new(reqwest::Client::new(), server.uri(), "key"));
        TeamStatsService::new(fetcher, api, roster.iter().map(|s| s.to_string()).collect())
    }

    async fn mount_player(server: &MockServer, name: &str, expect: u64) {
        Mock::given(method("GET"))
            .and(path("/stats/br/v2"))
            .and(query_param("name", name.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "data": sample_stats(name, 3, 30, 1.5),
            })))
            .expect(expect)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_player_stats_cached_after_first_lookup() {
        let server = MockServer::start().await;
        mount_player(&server, "RootByte", 1).await;

        let service = test_service(&server, &["RootByte"]);

        let first = service.player_stats("RootByte").await;
        let second = service.player_stats("RootByte").await;

        assert!(first.is_some());
        assert!(second.is_some());
        // The mock's expect(1) verifies the second call never hit the wire.
    }

    #[tokio::test]
    async fn test_failed_lookup_is_unavailable_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats/br/v2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let service = test_service(&server, &["RootByte"]);

        assert!(service.player_stats("RootByte").await.is_none());
        // Negative outcome is cached; no second upstream call.
        assert!(service.player_stats("RootByte").await.is_none());
    }

    #[tokio::test]
    async fn test_team_stats_covers_whole_roster() {
        let server = MockServer::start().await;
        mount_player(&server, "Alpha", 1).await;
        mount_player(&server, "Beta", 1).await;
        Mock::given(method("GET"))
            .and(path("/stats/br/v2"))
            .and(query_param("name", "Offline"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let service = test_service(&server, &["Alpha", "Beta", "Offline"]);

        let team = service.team_stats().await;

        assert_eq!(team.len(), 3);
        assert!(team["Alpha"].is_some());
        assert!(team["Beta"].is_some());
        assert!(team["Offline"].is_none());
    }

    #[tokio::test]
    async fn test_refresh_player_goes_back_upstream() {
        let server = MockServer::start().await;
        mount_player(&server, "RootByte", 2).await;

        let service = test_service(&server, &["RootByte"]);

        service.player_stats("RootByte").await;
        let refreshed = service.refresh_player("RootByte").await;

        assert!(refreshed.is_some());
        // expect(2): the refresh bypassed the still-fresh cache entry.
    }

    #[tokio::test]
    async fn test_preload_warms_the_cache() {
        let server = MockServer::start().await;
        mount_player(&server, "Alpha", 1).await;
        mount_player(&server, "Beta", 1).await;

        let service = test_service(&server, &["Alpha", "Beta"]);

        service.preload().await;

        // Subsequent lookups are all hits; expect(1) per mock verifies it.
        assert!(service.player_stats("Alpha").await.is_some());
        assert!(service.player_stats("Beta").await.is_some());
        assert_eq!(service.cache_stats().await.total_entries, 2);
    }

    #[tokio::test]
    async fn test_roster_membership() {
        let server = MockServer::start().await;
        let service = test_service(&server, &["Alpha", "Beta"]);

        assert_eq!(service.roster(), ["Alpha", "Beta"]);
        assert!(service.is_roster_member("Alpha"));
        assert!(!service.is_roster_member("Mallory"));
    }

    #[tokio::test]
    async fn test_flush_cache_forces_refetch() {
        let server = MockServer::start().await;
        mount_player(&server, "RootByte", 2).await;

        let service = test_service(&server, &["RootByte"]);

        service.player_stats("RootByte").await;
        assert_eq!(service.cache_stats().await.total_entries, 1);

        service.flush_cache().await;
        assert_eq!(service.cache_stats().await.total_entries, 0);

        service.player_stats("RootByte").await;
        // expect(2) on the mock verifies the refetch.
    }
}
