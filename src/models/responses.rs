//! Response DTOs for the stats service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{PlayerStats, TeamTotals};

/// Response body for a single player lookup (GET /players/:name/stats)
///
/// A failed or still-unfetchable lookup is an explicit `available: false`
/// payload, never an error response.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatsResponse {
    /// The requested player name
    pub player: String,
    /// Whether stats could be retrieved
    pub available: bool,
    /// The stats, when available
    pub stats: Option<PlayerStats>,
}

impl PlayerStatsResponse {
    /// Creates a new PlayerStatsResponse
    pub fn new(player: impl Into<String>, stats: Option<PlayerStats>) -> Self {
        Self {
            player: player.into(),
            available: stats.is_some(),
            stats,
        }
    }
}

/// Response body for the team-wide lookup (GET /team/stats)
#[derive(Debug, Clone, Serialize)]
pub struct TeamStatsResponse {
    /// Per-player stats, `null` where unavailable
    pub players: HashMap<String, Option<PlayerStats>>,
    /// Aggregates across the available players
    pub totals: TeamTotals,
}

impl TeamStatsResponse {
    /// Creates a new TeamStatsResponse, computing the totals.
    pub fn new(players: HashMap<String, Option<PlayerStats>>) -> Self {
        let totals = TeamTotals::from_team(&players);
        Self { players, totals }
    }
}

/// Response body for the cache stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Current number of entries in cache (unswept expired ones included)
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Lookups currently queued behind the rate window
    pub queued_lookups: usize,
}

impl CacheStatsResponse {
    /// Creates a new CacheStatsResponse from cache and scheduler state.
    pub fn new(stats: &CacheStats, queued_lookups: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            queued_lookups,
        }
    }
}

/// Response body for the cache flush endpoint (POST /cache/flush)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
}

impl FlushResponse {
    /// Creates a new FlushResponse
    pub fn new() -> Self {
        Self {
            message: "Cache flushed".to_string(),
        }
    }
}

impl Default for FlushResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy HealthResponse with the current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
