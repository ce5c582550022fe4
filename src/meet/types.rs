use serde::{Deserialize, Serialize};

use crate::runs::types::RunInput;
use crate::scoring::ScoreResult;

/// Meet sheet: every team gets two scored runs.
///
/// Example YAML:
/// ```yaml
/// teams:
///   - team: "Team 14"
///     penalty: 50
///     run1: { vehicle_distance_cm: 12, time1: 9.8, time2: 9.9 }
///     run2: { failed_run: true }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MeetSheet {
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TeamEntry {
    pub team: String,
    #[serde(default)]
    pub run1: RunInput,
    #[serde(default)]
    pub run2: RunInput,
    /// Meet-level penalty points added after best-of-two (e.g. late impound)
    #[serde(default)]
    pub penalty: Option<f64>,
}

/// Which of a team's two runs counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestRun {
    First,
    Second,
}

impl BestRun {
    pub fn number(self) -> u8 {
        match self {
            BestRun::First => 1,
            BestRun::Second => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeetResult {
    pub team: String,
    pub run1: ScoreResult,
    pub run2: ScoreResult,
    pub best: f64,
    pub best_run: BestRun,
    pub penalty: f64,
    pub final_score: f64,
}
