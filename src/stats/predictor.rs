//! Head-to-head win probability from team OPS and ERA.
//!
//! Each team gets a heuristic power score, `OPS * 1000 - ERA * 50`, floored
//! at 1 so that a hopeless team never produces a zero or negative share.
//! Team A's probability is its share of the combined power rounded to two
//! decimals; team B gets the complement, so the pair always sums to 1.0.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::MissingTeamPolicy;
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictorConfig {
    pub ops_weight: f64,
    pub era_weight: f64,
    /// Lower bound applied to every power score
    pub min_power: f64,
    pub default_ops: f64,
    pub default_era: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        PredictorConfig {
            ops_weight: 1000.0,
            era_weight: 50.0,
            min_power: 1.0,
            default_ops: 0.7,
            default_era: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchupStats {
    pub ops: f64,
    pub era: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamChance {
    pub name: String,
    pub win_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupResult {
    #[serde(rename = "teamA")]
    pub team_a: TeamChance,
    #[serde(rename = "teamB")]
    pub team_b: TeamChance,
    pub winner: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("Missing team names")]
    MissingInput,
    #[error("Team data not found")]
    TeamNotFound(String),
}

pub fn power(stats: MatchupStats, config: &PredictorConfig) -> f64 {
    let raw = stats.ops * config.ops_weight - stats.era * config.era_weight;
    raw.max(config.min_power)
}

/// Two-decimal rounding with ties to even, so a share of exactly .xx5
/// rounds the same way whichever side of the matchup it lands on.
fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

pub fn predict(
    name_a: &str,
    stats_a: MatchupStats,
    name_b: &str,
    stats_b: MatchupStats,
    config: &PredictorConfig,
) -> MatchupResult {
    let power_a = power(stats_a, config);
    let power_b = power(stats_b, config);

    let prob_a = round2(power_a / (power_a + power_b));
    let prob_b = 1.0 - prob_a;

    // Strict comparison: an even split goes to team A.
    let winner = if prob_b > prob_a { name_b } else { name_a };

    MatchupResult {
        team_a: TeamChance {
            name: name_a.to_string(),
            win_probability: prob_a,
        },
        team_b: TeamChance {
            name: name_b.to_string(),
            win_probability: prob_b,
        },
        winner: winner.to_string(),
    }
}

/// Resolve both team names against the store and predict the matchup.
pub fn predict_by_name(
    store: &RecordStore,
    team_a: Option<&str>,
    team_b: Option<&str>,
    policy: MissingTeamPolicy,
    config: &PredictorConfig,
) -> Result<MatchupResult, PredictError> {
    let (name_a, name_b) = match (team_a, team_b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => (a, b),
        _ => return Err(PredictError::MissingInput),
    };

    let stats_a = matchup_stats(store, name_a, policy, config)?;
    let stats_b = matchup_stats(store, name_b, policy, config)?;

    let result = predict(name_a, stats_a, name_b, stats_b, config);
    debug!(
        "Predicted {} {:.2} vs {} {:.2}",
        name_a, result.team_a.win_probability, name_b, result.team_b.win_probability
    );
    Ok(result)
}

fn matchup_stats(
    store: &RecordStore,
    name: &str,
    policy: MissingTeamPolicy,
    config: &PredictorConfig,
) -> Result<MatchupStats, PredictError> {
    let stats = store.team(name).and_then(|t| t.team_stats);
    let stats = match (stats, policy) {
        (Some(s), _) => s,
        (None, MissingTeamPolicy::Fallback) => {
            debug!("No stats for {:?}, using prediction defaults", name);
            Default::default()
        }
        (None, MissingTeamPolicy::Reject) => {
            return Err(PredictError::TeamNotFound(name.to_string()))
        }
    };
    Ok(MatchupStats {
        ops: stats.ops.unwrap_or(config.default_ops),
        era: stats.era.unwrap_or(config.default_era),
    })
}
