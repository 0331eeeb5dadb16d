//! Map raw team pitching/hitting figures onto a common 0–100 scale for charts.
//!
//! Each stat has a fixed `[min, max]` band and a direction. A raw value is
//! min-max scaled into the band and clamped, so anything past either edge
//! scores the same as the edge itself (ERA 12 scores 0, just like ERA 10).

use serde::Serialize;

use crate::store::models::TeamStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Closed value band for one stat. `min` and `max` must differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBand {
    pub min: f64,
    pub max: f64,
    pub direction: Direction,
}

impl StatBand {
    pub const fn new(min: f64, max: f64, direction: Direction) -> Self {
        StatBand { min, max, direction }
    }
}

pub const ERA_BAND: StatBand = StatBand::new(0.0, 10.0, Direction::LowerIsBetter);
pub const OPS_BAND: StatBand = StatBand::new(0.6, 1.0, Direction::HigherIsBetter);
pub const WHIP_BAND: StatBand = StatBand::new(0.8, 2.0, Direction::LowerIsBetter);

/// Bands plus the worst-case values used when a team has no figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerConfig {
    pub era: StatBand,
    pub ops: StatBand,
    pub whip: StatBand,
    pub default_era: f64,
    pub default_ops: f64,
    pub default_whip: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            era: ERA_BAND,
            ops: OPS_BAND,
            whip: WHIP_BAND,
            default_era: 10.0,
            default_ops: 0.6,
            default_whip: 2.0,
        }
    }
}

/// Per-stat scores in [0, 100]; higher is always better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedStats {
    #[serde(rename = "ERA")]
    pub era: f64,
    #[serde(rename = "OPS")]
    pub ops: f64,
    #[serde(rename = "WHIP")]
    pub whip: f64,
}

/// Position of `value` inside `[min, max]`, clamped to [0, 1].
pub fn scale(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Score a single raw value against its band.
pub fn score(value: f64, band: StatBand) -> f64 {
    let s = scale(value, band.min, band.max);
    match band.direction {
        Direction::HigherIsBetter => s * 100.0,
        Direction::LowerIsBetter => (1.0 - s) * 100.0,
    }
}

pub fn normalize(stats: &TeamStats, config: &NormalizerConfig) -> NormalizedStats {
    NormalizedStats {
        era: score(stats.era.unwrap_or(config.default_era), config.era),
        ops: score(stats.ops.unwrap_or(config.default_ops), config.ops),
        whip: score(stats.whip.unwrap_or(config.default_whip), config.whip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stats(era: f64, ops: f64, whip: f64) -> TeamStats {
        TeamStats {
            era: Some(era),
            ops: Some(ops),
            whip: Some(whip),
        }
    }

    #[test]
    fn scale_endpoints_and_midpoint() {
        assert_relative_eq!(scale(0.6, 0.6, 1.0), 0.0);
        assert_relative_eq!(scale(1.0, 0.6, 1.0), 1.0);
        assert_relative_eq!(scale(0.8, 0.6, 1.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn direction_flips_score() {
        let up = StatBand::new(0.0, 10.0, Direction::HigherIsBetter);
        let down = StatBand::new(0.0, 10.0, Direction::LowerIsBetter);
        assert_relative_eq!(score(2.5, up), 25.0, epsilon = 1e-9);
        assert_relative_eq!(score(2.5, down), 75.0, epsilon = 1e-9);
    }

    #[test]
    fn known_team_scores() {
        let n = normalize(&stats(2.0, 0.9, 1.0), &NormalizerConfig::default());
        assert_relative_eq!(n.era, 80.0, epsilon = 1e-9);
        assert_relative_eq!(n.ops, 75.0, epsilon = 1e-9);
        // (1 - (1.0 - 0.8) / 1.2) * 100
        assert_relative_eq!(n.whip, 83.333_333_333, epsilon = 1e-6);
    }

    #[test]
    fn out_of_band_values_clamp() {
        let cfg = NormalizerConfig::default();
        assert_relative_eq!(score(15.0, cfg.era), score(10.0, cfg.era));
        assert_relative_eq!(score(15.0, cfg.era), 0.0);
        assert_relative_eq!(score(0.5, cfg.ops), score(0.6, cfg.ops));
        assert_relative_eq!(score(0.5, cfg.ops), 0.0);
        assert_relative_eq!(score(-1.0, cfg.era), 100.0);
        assert_relative_eq!(score(3.0, cfg.whip), 0.0);
        assert_relative_eq!(score(1.4, cfg.ops), 100.0);
    }

    #[test]
    fn missing_stats_score_worst() {
        let n = normalize(&TeamStats::default(), &NormalizerConfig::default());
        assert_relative_eq!(n.era, 0.0);
        assert_relative_eq!(n.ops, 0.0);
        assert_relative_eq!(n.whip, 0.0);
    }

    #[test]
    fn overridden_defaults_are_used() {
        let cfg = NormalizerConfig {
            default_era: 5.0,
            ..NormalizerConfig::default()
        };
        let n = normalize(&TeamStats::default(), &cfg);
        assert_relative_eq!(n.era, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn scores_stay_in_range_and_are_monotonic() {
        let cfg = NormalizerConfig::default();
        let steps = 50;
        let mut prev: Option<NormalizedStats> = None;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let n = normalize(
                &stats(10.0 * t, 0.6 + 0.4 * t, 0.8 + 1.2 * t),
                &cfg,
            );
            for v in [n.era, n.ops, n.whip] {
                assert!((0.0..=100.0).contains(&v), "score {} out of range", v);
            }
            if let Some(p) = prev {
                // ERA and WHIP rise with t, so their scores fall; OPS rises.
                assert!(n.era <= p.era);
                assert!(n.whip <= p.whip);
                assert!(n.ops >= p.ops);
            }
            prev = Some(n);
        }
    }
}
