use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::{compute_score, ScoreResult, ScoringConfig};

pub const STORE_VERSION: u32 = 1;

/// Raw measurements for one attempt, as captured at the track.
///
/// Every number is optional; the scoring engine coerces missing or invalid
/// values instead of rejecting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunInput {
    pub target_distance_m: Option<f64>,
    pub vehicle_distance_cm: Option<f64>,
    pub time1: Option<f64>,
    pub time2: Option<f64>,
    pub time3: Option<f64>,
    pub car_angle_deg: Option<f64>,
    pub dial_turns: Option<f64>,
    pub winds: Option<f64>,
    pub bucket_bonus: bool,
    pub failed_run: bool,
    pub competition_violation: bool,
    pub construction_violation: bool,
}

impl RunInput {
    pub fn times(&self) -> [Option<f64>; 3] {
        [self.time1, self.time2, self.time3]
    }
}

/// A saved attempt.
///
/// `score` and `time_avg` are cached at save time and are the historical
/// record: they are never recomputed from the inputs, so a later change to
/// the scoring constants leaves old runs untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub input: RunInput,
    pub score: f64,
    pub time_avg: f64,
    #[serde(default)]
    pub notes: String,
}

impl Run {
    /// Score `input` and stamp it with a fresh id and the current time.
    pub fn record(user: &str, input: RunInput, notes: String, config: &ScoringConfig) -> Self {
        let result = compute_score(&input, config);
        Self::from_result(user, input, notes, &result)
    }

    /// Build a run from an already computed preview score.
    pub fn from_result(user: &str, input: RunInput, notes: String, result: &ScoreResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user: user.to_string(),
            created_at: Utc::now(),
            input,
            score: result.total,
            time_avg: result.time_avg,
            notes,
        }
    }
}

/// All saved runs, keyed by owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStore {
    pub version: u32,
    #[serde(default)]
    pub users: BTreeMap<String, Vec<Run>>,
}

impl Default for RunStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStore {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            users: BTreeMap::new(),
        }
    }

    /// Runs owned by `user`, in the order they were appended
    pub fn runs_for(&self, user: &str) -> &[Run] {
        self.users.get(user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a run to its owner's list
    pub fn append(&mut self, run: Run) {
        self.users.entry(run.user.clone()).or_default().push(run);
    }

    /// Remove one of `user`'s runs by id. Returns the removed run, if any.
    pub fn remove(&mut self, user: &str, id: &str) -> Option<Run> {
        let runs = self.users.get_mut(user)?;
        let pos = runs.iter().position(|r| r.id == id)?;
        let removed = runs.remove(pos);
        if runs.is_empty() {
            self.users.remove(user);
        }
        Some(removed)
    }

    /// Delete every run owned by `user`. Returns how many were removed.
    pub fn clear_user(&mut self, user: &str) -> usize {
        self.users.remove(user).map(|runs| runs.len()).unwrap_or(0)
    }

    pub fn total_runs(&self) -> usize {
        self.users.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input(distance: f64) -> RunInput {
        RunInput {
            target_distance_m: Some(7.0),
            vehicle_distance_cm: Some(distance),
            time1: Some(9.5),
            ..RunInput::default()
        }
    }

    #[test]
    fn test_record_caches_score() {
        let run = Run::record("ada", sample_input(20.0), String::new(), &ScoringConfig::default());
        assert_eq!(run.user, "ada");
        assert_eq!(run.score, 149.5);
        assert_eq!(run.time_avg, 9.5);
        assert!(!run.id.is_empty());
    }

    #[test]
    fn test_record_unique_ids() {
        let config = ScoringConfig::default();
        let a = Run::record("ada", sample_input(1.0), String::new(), &config);
        let b = Run::record("ada", sample_input(1.0), String::new(), &config);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_new_store_empty() {
        let store = RunStore::new();
        assert_eq!(store.version, 1);
        assert!(store.runs_for("ada").is_empty());
        assert_eq!(store.total_runs(), 0);
    }

    #[test]
    fn test_append_scopes_by_user() {
        let config = ScoringConfig::default();
        let mut store = RunStore::new();
        store.append(Run::record("ada", sample_input(1.0), String::new(), &config));
        store.append(Run::record("ada", sample_input(2.0), String::new(), &config));
        store.append(Run::record("bo", sample_input(3.0), String::new(), &config));

        assert_eq!(store.runs_for("ada").len(), 2);
        assert_eq!(store.runs_for("bo").len(), 1);
        assert_eq!(store.total_runs(), 3);
    }

    #[test]
    fn test_remove_by_id() {
        let config = ScoringConfig::default();
        let mut store = RunStore::new();
        let run = Run::record("ada", sample_input(1.0), String::new(), &config);
        let id = run.id.clone();
        store.append(run);
        store.append(Run::record("ada", sample_input(2.0), String::new(), &config));

        let removed = store.remove("ada", &id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(store.runs_for("ada").len(), 1);
        assert!(store.remove("ada", &id).is_none());
    }

    #[test]
    fn test_remove_other_users_run_is_noop() {
        let config = ScoringConfig::default();
        let mut store = RunStore::new();
        let run = Run::record("ada", sample_input(1.0), String::new(), &config);
        let id = run.id.clone();
        store.append(run);

        assert!(store.remove("bo", &id).is_none());
        assert_eq!(store.runs_for("ada").len(), 1);
    }

    #[test]
    fn test_clear_user() {
        let config = ScoringConfig::default();
        let mut store = RunStore::new();
        store.append(Run::record("ada", sample_input(1.0), String::new(), &config));
        store.append(Run::record("ada", sample_input(2.0), String::new(), &config));
        store.append(Run::record("bo", sample_input(3.0), String::new(), &config));

        assert_eq!(store.clear_user("ada"), 2);
        assert!(store.runs_for("ada").is_empty());
        assert_eq!(store.runs_for("bo").len(), 1);
        assert_eq!(store.clear_user("ada"), 0);
    }

    #[test]
    fn test_run_json_is_flat() {
        let run = Run::record("ada", sample_input(1.0), "windy".to_string(), &ScoringConfig::default());
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["vehicle_distance_cm"], 1.0);
        assert_eq!(json["notes"], "windy");
        assert!(json.get("input").is_none());

        let parsed: Run = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, run);
    }

    #[test]
    fn test_input_parses_with_missing_fields() {
        let input: RunInput = serde_json::from_str(r#"{"time1": 4.2, "failed_run": true}"#).unwrap();
        assert_eq!(input.time1, Some(4.2));
        assert!(input.failed_run);
        assert!(input.vehicle_distance_cm.is_none());
        assert!(!input.bucket_bonus);
    }
}
