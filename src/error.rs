//! Error types for the stats service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Stats Error Enum ==
/// Unified error type for the stats service.
#[derive(Error, Debug)]
pub enum StatsError {
    /// Transport-level failure talking to the upstream stats API
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream stats API answered with a non-success status
    #[error("upstream stats API returned status {0}")]
    Api(u16),

    /// Upstream stats API has no data for the player
    #[error("no stats found for player: {0}")]
    PlayerNotFound(String),

    /// Player is not part of the configured roster
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// The scheduler dropped the request before it completed
    #[error("scheduler dropped the request before completion")]
    SchedulerClosed,
}

// == IntoResponse Implementation ==
impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let status = match &self {
            StatsError::PlayerNotFound(_) | StatsError::UnknownPlayer(_) => StatusCode::NOT_FOUND,
            StatsError::Upstream(_) | StatsError::Api(_) => StatusCode::BAD_GATEWAY,
            StatsError::SchedulerClosed => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the stats service.
pub type Result<T> = std::result::Result<T, StatsError>;
