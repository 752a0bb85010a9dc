//! Upstream Stats API Client
//!
//! Thin reqwest client for the third-party stats endpoint. One request per
//! logical call; retrying is left to the caller's cache TTLs (a failed
//! lookup is cached briefly, then naturally retried).

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, StatsError};
use crate::models::PlayerStats;

/// Envelope wrapping every upstream response body.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: u16,
    data: Option<T>,
}

// == Stats API Client ==
/// Client for the external player statistics API.
///
/// Authenticates with a static credential in the `Authorization` header.
/// The client holds a connection-pooling [`reqwest::Client`] and is cheap
/// to share behind an `Arc`.
#[derive(Debug)]
pub struct StatsApi {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StatsApi {
    // == Constructors ==
    /// Creates a client against the given base URL.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Creates a client from service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            reqwest::Client::new(),
            config.stats_api_base_url.clone(),
            config.stats_api_key.clone(),
        )
    }

    // == Player Stats ==
    /// Fetches lifetime battle-royale stats for `name`.
    ///
    /// Maps HTTP 404 and an empty envelope to
    /// [`StatsError::PlayerNotFound`], any other non-success status to
    /// [`StatsError::Api`].
    pub async fn player_stats(&self, name: &str) -> Result<PlayerStats> {
        let url = format!("{}/stats/br/v2", self.base_url);
        debug!(player = name, "requesting upstream stats");

        let mut request = self.http.get(&url).query(&[("name", name)]);
        if !self.api_key.is_empty() {
            request = request.header(AUTHORIZATION, self.api_key.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(StatsError::PlayerNotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(StatsError::Api(status.as_u16()));
        }

        let envelope: ApiEnvelope<PlayerStats> = response.json().await?;
        if envelope.status != 200 {
            return Err(StatsError::Api(envelope.status));
        }
        envelope
            .data
            .ok_or_else(|| StatsError::PlayerNotFound(name.to_string()))
    }
}
