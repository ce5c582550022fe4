use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{BestRun, MeetResult, MeetSheet, TeamEntry};
use crate::scoring::numeric::{round2, saturate, valid_measurement};
use crate::scoring::{compute_score, ScoringConfig};

/// Score both runs of a team and keep the better (lower) one.
///
/// Run 1 counts on a tie. The meet penalty is added on top of the best run;
/// a missing, negative or non-finite penalty counts as 0.
pub fn score_team(entry: &TeamEntry, config: &ScoringConfig) -> MeetResult {
    let run1 = compute_score(&entry.run1, config);
    let run2 = compute_score(&entry.run2, config);

    let (best, best_run) = if run2.total < run1.total {
        (run2.total, BestRun::Second)
    } else {
        (run1.total, BestRun::First)
    };

    let penalty = round2(valid_measurement(entry.penalty).unwrap_or(0.0));

    MeetResult {
        team: entry.team.clone(),
        run1,
        run2,
        best,
        best_run,
        penalty,
        final_score: round2(saturate(best + penalty)),
    }
}

/// Score every team and order them by final score, lowest first. Teams with
/// equal finals keep their sheet order.
pub fn rank_meet(entries: &[TeamEntry], config: &ScoringConfig) -> Vec<MeetResult> {
    let mut results: Vec<MeetResult> = entries.iter().map(|e| score_team(e, config)).collect();
    results.sort_by(|a, b| a.final_score.total_cmp(&b.final_score));
    results
}

/// Load a meet sheet from a YAML file
pub fn load_meet_sheet(path: &Path) -> Result<MeetSheet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read meet sheet at {}", path.display()))?;

    let sheet: MeetSheet = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse meet sheet: invalid YAML in {}", path.display()))?;

    log::debug!("Loaded {} teams from {}", sheet.teams.len(), path.display());
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runs::types::RunInput;

    fn entry(team: &str, dist1: f64, dist2: f64, penalty: Option<f64>) -> TeamEntry {
        TeamEntry {
            team: team.to_string(),
            run1: RunInput {
                vehicle_distance_cm: Some(dist1),
                ..RunInput::default()
            },
            run2: RunInput {
                vehicle_distance_cm: Some(dist2),
                ..RunInput::default()
            },
            penalty,
        }
    }

    #[test]
    fn test_best_of_two_picks_lower() {
        let result = score_team(&entry("A", 50.0, 20.0, None), &ScoringConfig::default());
        assert_eq!(result.run1.total, 200.0);
        assert_eq!(result.run2.total, 140.0);
        assert_eq!(result.best, 140.0);
        assert_eq!(result.best_run, BestRun::Second);
        assert_eq!(result.final_score, 140.0);
    }

    #[test]
    fn test_tie_keeps_first_run() {
        let result = score_team(&entry("A", 30.0, 30.0, None), &ScoringConfig::default());
        assert_eq!(result.best_run, BestRun::First);
        assert_eq!(result.best_run.number(), 1);
    }

    #[test]
    fn test_penalty_added_after_best() {
        let result = score_team(&entry("A", 50.0, 20.0, Some(75.5)), &ScoringConfig::default());
        assert_eq!(result.penalty, 75.5);
        assert_eq!(result.final_score, 215.5);
    }

    #[test]
    fn test_invalid_penalty_ignored() {
        let config = ScoringConfig::default();
        assert_eq!(score_team(&entry("A", 0.0, 0.0, Some(-10.0)), &config).penalty, 0.0);
        assert_eq!(score_team(&entry("A", 0.0, 0.0, Some(f64::NAN)), &config).penalty, 0.0);
    }

    #[test]
    fn test_failed_run_loses_to_measured_run() {
        let mut team = entry("A", 400.0, 0.0, None);
        team.run2.failed_run = true;
        let result = score_team(&team, &ScoringConfig::default());
        assert_eq!(result.run2.breakdown.dist_cm, 2500.0);
        assert_eq!(result.best_run, BestRun::First);
        assert_eq!(result.final_score, 900.0);
    }

    #[test]
    fn test_rank_meet_orders_by_final() {
        let entries = vec![
            entry("Slow", 90.0, 80.0, None),
            entry("Fast", 10.0, 15.0, None),
            entry("Penalized", 5.0, 6.0, Some(300.0)),
        ];
        let ranked = rank_meet(&entries, &ScoringConfig::default());
        let teams: Vec<&str> = ranked.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["Fast", "Slow", "Penalized"]);
    }

    #[test]
    fn test_rank_meet_stable_on_ties() {
        let entries = vec![entry("B", 10.0, 10.0, None), entry("A", 10.0, 10.0, None)];
        let ranked = rank_meet(&entries, &ScoringConfig::default());
        assert_eq!(ranked[0].team, "B");
        assert_eq!(ranked[1].team, "A");
    }

    #[test]
    fn test_rank_meet_empty() {
        assert!(rank_meet(&[], &ScoringConfig::default()).is_empty());
    }

    #[test]
    fn test_parse_meet_sheet() {
        let yaml = r#"
teams:
  - team: "Team 14"
    penalty: 50
    run1:
      vehicle_distance_cm: 12
      time1: 9.8
      time2: 9.9
    run2:
      failed_run: true
  - team: "Team 3"
"#;
        let sheet: MeetSheet = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(sheet.teams.len(), 2);
        assert_eq!(sheet.teams[0].penalty, Some(50.0));
        assert_eq!(sheet.teams[0].run1.vehicle_distance_cm, Some(12.0));
        assert!(sheet.teams[0].run2.failed_run);
        assert_eq!(sheet.teams[1].run1, RunInput::default());
    }

    #[test]
    fn test_load_meet_sheet_missing_file() {
        let path = std::env::temp_dir().join("setup_scout_test_no_such_meet.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_meet_sheet(&path).is_err());
    }

    #[test]
    fn test_overflowing_team_ranks_last() {
        let config = ScoringConfig::default();
        let entries = vec![
            entry("Huge", 1e308, 1e308, Some(f64::MAX)),
            entry("Steady", 300.0, 320.0, None),
        ];
        let results = rank_meet(&entries, &config);
        assert_eq!(results[0].team, "Steady");
        assert_eq!(results[1].team, "Huge");
        assert_eq!(results[1].final_score, f64::MAX);
    }
}
