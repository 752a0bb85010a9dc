//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default roster served by the site when `TEAM_MEMBERS` is not set.
const DEFAULT_ROSTER: &[&str] = &[
    "RootByte",
    "neto-_FTW",
    "Intercêptor",
    "FTW_SAITAMA",
    "Rey Bjorn FTW",
    "ValkyFTW",
];

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream stats API
    pub stats_api_base_url: String,
    /// Static credential sent in the Authorization header
    pub stats_api_key: String,
    /// Player names to fetch for team-wide views
    pub roster: Vec<String>,
    /// TTL applied to successful lookups
    pub success_ttl: Duration,
    /// TTL applied to failed lookups, kept short so they retry sooner
    pub failure_ttl: Duration,
    /// Interval between background sweeps of expired entries
    pub sweep_interval: Duration,
    /// Maximum admissions per rate window
    pub max_per_window: usize,
    /// Length of the sliding rate window
    pub window: Duration,
    /// Safety margin added when sleeping for the window to open
    pub wait_margin: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_API_BASE_URL` - Upstream stats API base URL
    /// - `STATS_API_KEY` - Upstream stats API credential (default: empty)
    /// - `TEAM_MEMBERS` - Comma-separated roster override
    /// - `SUCCESS_TTL_MS` - TTL for successful lookups (default: 600000, 10 minutes)
    /// - `FAILURE_TTL_MS` - TTL for failed lookups (default: 120000, 2 minutes)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency (default: 1800000, 30 minutes)
    /// - `MAX_PER_WINDOW` - Admissions per window (default: 3)
    /// - `WINDOW_MS` - Rate window length (default: 1000)
    /// - `WAIT_MARGIN_MS` - Extra sleep past the window (default: 10)
    pub fn from_env() -> Self {
        Self {
            server_port: parse_env("SERVER_PORT", 3000),
            stats_api_base_url: env::var("STATS_API_BASE_URL")
                .unwrap_or_else(|_| "https://fortnite-api.com/v2".to_string()),
            stats_api_key: env::var("STATS_API_KEY").unwrap_or_default(),
            roster: env::var("TEAM_MEMBERS")
                .map(|v| {
                    v.split(',')
                        .map(|name| name.trim().to_string())
                        .filter(|name| !name.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| default_roster()),
            success_ttl: Duration::from_millis(parse_env("SUCCESS_TTL_MS", 600_000)),
            failure_ttl: Duration::from_millis(parse_env("FAILURE_TTL_MS", 120_000)),
            sweep_interval: Duration::from_millis(parse_env("SWEEP_INTERVAL_MS", 1_800_000)),
            max_per_window: parse_env("MAX_PER_WINDOW", 3),
            window: Duration::from_millis(parse_env("WINDOW_MS", 1_000)),
            wait_margin: Duration::from_millis(parse_env("WAIT_MARGIN_MS", 10)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            stats_api_base_url: "https://fortnite-api.com/v2".to_string(),
            stats_api_key: String::new(),
            roster: default_roster(),
            success_ttl: Duration::from_millis(600_000),
            failure_ttl: Duration::from_millis(120_000),
            sweep_interval: Duration::from_millis(1_800_000),
            max_per_window: 3,
            window: Duration::from_millis(1_000),
            wait_margin: Duration::from_millis(10),
        }
    }
}

fn default_roster() -> Vec<String> {
    DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect()
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
