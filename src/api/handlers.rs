//! API Handlers
//!
//! HTTP request handlers for each stats service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{Result, StatsError};
use crate::models::{
    CacheStatsResponse, FlushResponse, HealthResponse, PlayerStatsResponse, TeamStatsResponse,
};
use crate::service::TeamStatsService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The domain service; owns the cache, scheduler, and upstream client
    pub service: Arc<TeamStatsService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: TeamStatsService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Handler for GET /players/:name/stats
///
/// Unknown players (outside the roster) are a 404. A roster member whose
/// stats cannot currently be fetched gets an `available: false` payload,
/// not an error.
pub async fn player_stats_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerStatsResponse>> {
    if !state.service.is_roster_member(&name) {
        return Err(StatsError::UnknownPlayer(name));
    }

    let stats = state.service.player_stats(&name).await;
    Ok(Json(PlayerStatsResponse::new(name, stats)))
}

/// Handler for GET /team/stats
///
/// Returns per-player stats for the whole roster plus the aggregated
/// totals the stats board renders.
pub async fn team_stats_handler(State(state): State<AppState>) -> Json<TeamStatsResponse> {
    let players = state.service.team_stats().await;
    Json(TeamStatsResponse::new(players))
}

/// Handler for POST /players/:name/refresh
///
/// Drops the cached entry for the player and fetches fresh stats.
pub async fn refresh_player_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerStatsResponse>> {
    if !state.service.is_roster_member(&name) {
        return Err(StatsError::UnknownPlayer(name));
    }

    let stats = state.service.refresh_player(&name).await;
    Ok(Json(PlayerStatsResponse::new(name, stats)))
}

/// Handler for GET /cache/stats
///
/// Returns cache statistics plus the scheduler's queue depth.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.service.cache_stats().await;
    let queued = state.service.queued_lookups().await;

    Json(CacheStatsResponse::new(&stats, queued))
}

/// Handler for POST /cache/flush
///
/// Administrative cache flush; safe to call repeatedly.
pub async fn flush_cache_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    state.service.flush_cache().await;
    Json(FlushResponse::new())
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
