//! API Routes
//!
//! Configures the Axum router with all stats service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, flush_cache_handler, health_handler, player_stats_handler,
    refresh_player_handler, team_stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /players/:name/stats` - Stats for one roster member
/// - `POST /players/:name/refresh` - Force-refresh one roster member
/// - `GET /team/stats` - Roster-wide stats with totals
/// - `GET /cache/stats` - Cache statistics and queue depth
/// - `POST /cache/flush` - Administrative cache flush
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: allows any origin so the site frontend can call from anywhere
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/players/:name/stats", get(player_stats_handler))
        .route("/players/:name/refresh", post(refresh_player_handler))
        .route("/team/stats", get(team_stats_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/flush", post(flush_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
