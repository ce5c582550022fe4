use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use super::numeric::{finite_or_zero, mean, round2, saturate, valid_measurement};
use crate::runs::types::RunInput;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub dist_cm: f64,           // Distance actually scored (2500 for failed runs)
    pub distance_score: f64,
    pub time_score: f64,
    pub bucket_adjustment: f64, // Negative when the bonus applies
    pub penalty_points: f64,    // Competition + construction violations
}

impl ScoreBreakdown {
    /// Labeled components in the order they are summed, base score excluded.
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("Distance", self.distance_score),
            ("Time", self.time_score),
            ("Bucket", self.bucket_adjustment),
            ("Penalties", self.penalty_points),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: f64,
    pub time_avg: f64,
    pub failed: bool,
    pub breakdown: ScoreBreakdown,
}

/// Score a single run. Lower is better.
///
/// Never fails: missing or non-finite numbers are coerced (times are dropped
/// from the average, distance falls back to 0). A failed run is scored at the
/// configured worst-case distance with no time contribution, whatever the
/// measured fields say. Every reported number is finite: sums that overflow
/// saturate at `f64::MAX`, so a huge measurement scores as the worst run.
pub fn compute_score(input: &RunInput, config: &ScoringConfig) -> ScoreResult {
    let failed = input.failed_run;

    // Kept unrounded until the final sum
    let time_avg = if failed {
        0.0
    } else {
        average_time(input)
    };

    let dist_cm = if failed {
        config.failed_distance_cm()
    } else {
        valid_measurement(input.vehicle_distance_cm).unwrap_or(0.0)
    };

    let distance_score = saturate(config.distance_weight() * dist_cm);
    let time_score = saturate(config.time_weight() * time_avg);

    let bucket_adjustment = if input.bucket_bonus {
        -config.bucket_bonus()
    } else {
        0.0
    };

    let mut penalty_points = 0.0;
    if input.competition_violation {
        penalty_points += config.competition_penalty();
    }
    if input.construction_violation {
        penalty_points += config.construction_penalty();
    }
    let penalty_points = saturate(penalty_points);

    let total = saturate(
        config.base_score() + distance_score + time_score + bucket_adjustment + penalty_points,
    );

    ScoreResult {
        total: round2(total),
        time_avg: round2(time_avg),
        failed,
        breakdown: ScoreBreakdown {
            dist_cm: round2(dist_cm),
            distance_score: round2(distance_score),
            time_score: round2(time_score),
            bucket_adjustment: round2(bucket_adjustment),
            penalty_points: round2(penalty_points),
        },
    }
}

/// Average of the valid (finite, non-negative) times; 0 when none are valid.
pub fn average_time(input: &RunInput) -> f64 {
    let valid = input
        .times()
        .into_iter()
        .filter_map(valid_measurement);
    finite_or_zero(mean(valid))
}
