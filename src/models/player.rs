//! Player Statistics Models
//!
//! Payload types for the upstream stats API (camelCase on the wire) and
//! the roster-wide aggregation derived from them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Player Stats ==
/// Statistics for a single player as returned by the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub account: Account,
    pub battle_pass: BattlePass,
    /// URL of the rendered stats image, when the API provides one
    #[serde(default)]
    pub image: Option<String>,
    pub stats: StatsBlock,
}

/// Upstream account identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// Battle pass progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlePass {
    pub level: u32,
    pub progress: u32,
}

/// Per-input-mode stats container; the site only uses the combined block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBlock {
    pub all: ModeStats,
}

/// Stats for one input mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStats {
    pub overall: OverallStats,
}

/// The overall lifetime stats the site renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub score: u64,
    pub score_per_min: f64,
    pub score_per_match: f64,
    pub wins: u64,
    pub top3: u64,
    pub top5: u64,
    pub top6: u64,
    pub top10: u64,
    pub top12: u64,
    pub top25: u64,
    pub kills: u64,
    pub kills_per_min: f64,
    pub kills_per_match: f64,
    pub deaths: u64,
    pub kd: f64,
    pub matches: u64,
    pub win_rate: f64,
    pub minutes_played: u64,
    pub players_outlived: u64,
    pub last_modified: DateTime<Utc>,
}

// == Team Totals ==
/// Aggregated stats across the whole roster.
///
/// Averages are taken over players with a positive K/D; players whose
/// stats are unavailable contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTotals {
    pub total_wins: u64,
    pub total_kills: u64,
    pub total_matches: u64,
    pub total_score: u64,
    pub average_kd: f64,
    pub average_win_rate: f64,
    pub valid_players: u32,
}

impl TeamTotals {
    /// Aggregates totals from a roster-wide stats map.
    pub fn from_team(team: &HashMap<String, Option<PlayerStats>>) -> Self {
        let mut totals = Self::default();
        let mut kd_sum = 0.0;
        let mut win_rate_sum = 0.0;

        for stats in team.values().flatten() {
            let overall = &stats.stats.all.overall;
            totals.total_wins += overall.wins;
            totals.total_kills += overall.kills;
            totals.total_matches += overall.matches;
            totals.total_score += overall.score;

            if overall.kd > 0.0 {
                kd_sum += overall.kd;
                totals.valid_players += 1;
            }
            if overall.win_rate > 0.0 {
                win_rate_sum += overall.win_rate;
            }
        }

        if totals.valid_players > 0 {
            totals.average_kd = kd_sum / f64::from(totals.valid_players);
            totals.average_win_rate = win_rate_sum / f64::from(totals.valid_players);
        }

        totals
    }
}

/// Test fixture shared by the unit and integration-style tests.
#[cfg(test)]
pub(crate) fn sample_stats(name: &str, wins: u64, kills: u64, kd: f64) -> PlayerStats {
    PlayerStats {
        account: Account {
            id: format!("id-{name}"),
            name: name.to_string(),
        },
        battle_pass: BattlePass {
            level: 87,
            progress: 40,
        },
        image: None,
        stats: StatsBlock {
            all: ModeStats {
                overall: OverallStats {
                    score: 1000,
                    score_per_min: 3.5,
                    score_per_match: 50.0,
                    wins,
                    top3: 10,
                    top5: 12,
                    top6: 14,
                    top10: 20,
                    top12: 22,
                    top25: 30,
                    kills,
                    kills_per_min: 0.2,
                    kills_per_match: 1.4,
                    deaths: 100,
                    kd,
                    matches: 200,
                    win_rate: 5.0,
                    minutes_played: 900,
                    players_outlived: 4000,
                    last_modified: Utc::now(),
                },
            },
        },
    }
}
