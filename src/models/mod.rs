//! Models Module
//!
//! Upstream payload types and HTTP response DTOs.

pub mod player;
pub mod responses;

pub use player::{Account, BattlePass, ModeStats, OverallStats, PlayerStats, StatsBlock, TeamTotals};
pub use responses::{
    CacheStatsResponse, FlushResponse, HealthResponse, PlayerStatsResponse, TeamStatsResponse,
};
