//! Squadstats - rate-limited, cached client for a team's player statistics
//!
//! Wraps a strict third-party stats API behind a TTL cache and a
//! sliding-window request scheduler, and serves the results as JSON for
//! the team's website.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use service::TeamStatsService;
pub use tasks::spawn_sweep_task;
