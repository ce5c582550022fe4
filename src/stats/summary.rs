use super::groups::{group_runs, TrackBucket};
use super::keys::{SetupKey, TrackKey};
use crate::runs::types::Run;
use crate::scoring::numeric::{mean, min_finite, round2};

/// Tolerance used when a target filter doesn't specify one. Tight enough to
/// behave like an exact match while absorbing float noise.
pub const DEFAULT_TOLERANCE_M: f64 = 0.005;

/// Keep only runs whose target distance is close to `target_m`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFilter {
    pub target_m: f64,
    pub tolerance_m: Option<f64>,
}

impl TargetFilter {
    pub fn new(target_m: f64) -> Self {
        Self {
            target_m,
            tolerance_m: None,
        }
    }

    pub fn with_tolerance(target_m: f64, tolerance_m: f64) -> Self {
        Self {
            target_m,
            tolerance_m: Some(tolerance_m),
        }
    }

    /// Effective tolerance; invalid values fall back to the default.
    pub fn tolerance(&self) -> f64 {
        match self.tolerance_m {
            Some(t) if t.is_finite() => t.abs(),
            _ => DEFAULT_TOLERANCE_M,
        }
    }

    /// Runs without a target never match an active filter.
    pub fn matches(&self, run: &Run) -> bool {
        match run.input.target_distance_m {
            Some(t) if t.is_finite() => (t - self.target_m).abs() <= self.tolerance(),
            _ => false,
        }
    }
}

/// Setup with the lowest mean score in a track.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupAverage {
    pub setup: String,
    pub avg_score: f64,
    pub runs: usize,
}

/// Setup that produced the lowest single score in a track.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupBest {
    pub setup: String,
    pub score: f64,
}

/// Statistics for one track. Scores are rounded to two decimals; lower is
/// better, so `best_score` is the minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub track: String,
    pub target_m: Option<f64>,
    pub runs: usize,
    pub avg_score: Option<f64>,
    pub best_score: Option<f64>,
    pub best_setup_by_avg: Option<SetupAverage>,
    pub best_setup_by_single: Option<SetupBest>,
}

/// Result of [`summarize`]. An empty run list, or a filter that removes
/// every run, is reported as `NoMatches` rather than as an empty table.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    NoMatches,
    Rows(Vec<SummaryRow>),
}

impl Summary {
    pub fn rows(&self) -> &[SummaryRow] {
        match self {
            Summary::NoMatches => &[],
            Summary::Rows(rows) => rows,
        }
    }

    pub fn is_no_matches(&self) -> bool {
        matches!(self, Summary::NoMatches)
    }
}

/// Group runs by track and setup and rank setups within each track.
///
/// Uses each run's cached `score`; nothing is re-scored. Tracks are ordered
/// by numeric target with untracked runs last. When two setups tie, the one
/// seen first in `runs` wins.
pub fn summarize(runs: &[Run], filter: Option<&TargetFilter>) -> Summary {
    let selected = runs
        .iter()
        .filter(|run| filter.map_or(true, |f| f.matches(run)));

    let mut tracks: Vec<(TrackKey, TrackBucket)> = group_runs(selected).into_iter().collect();
    if tracks.is_empty() {
        log::debug!("No runs left to summarize ({} before filtering)", runs.len());
        return Summary::NoMatches;
    }

    tracks.sort_by(|a, b| a.0.cmp(&b.0));

    log::debug!("Summarizing {} runs across {} tracks", runs.len(), tracks.len());

    Summary::Rows(
        tracks
            .iter()
            .map(|(key, bucket)| summarize_track(key, bucket))
            .collect(),
    )
}

fn summarize_track(key: &TrackKey, bucket: &TrackBucket) -> SummaryRow {
    let scores = || bucket.runs.iter().map(|r| r.score);

    SummaryRow {
        track: key.as_str().to_string(),
        target_m: key.value(),
        runs: bucket.runs.len(),
        avg_score: mean(scores()).map(round2),
        best_score: min_finite(scores()).map(round2),
        best_setup_by_avg: best_setup_by_avg(bucket),
        best_setup_by_single: best_setup_by_single(bucket),
    }
}

fn best_setup_by_avg(bucket: &TrackBucket) -> Option<SetupAverage> {
    let mut best: Option<(&SetupKey, f64, usize)> = None;
    for (setup, runs) in bucket.setups.iter() {
        let Some(avg) = mean(runs.iter().map(|r| r.score)) else {
            continue;
        };
        // Strictly lower only, so the first-encountered setup keeps a tie
        if best.map_or(true, |(_, b, _)| avg < b) {
            best = Some((setup, avg, runs.len()));
        }
    }
    best.map(|(setup, avg, runs)| SetupAverage {
        setup: setup.as_str().to_string(),
        avg_score: round2(avg),
        runs,
    })
}

fn best_setup_by_single(bucket: &TrackBucket) -> Option<SetupBest> {
    let mut best: Option<(&SetupKey, f64)> = None;
    for (setup, runs) in bucket.setups.iter() {
        let Some(score) = min_finite(runs.iter().map(|r| r.score)) else {
            continue;
        };
        if best.map_or(true, |(_, b)| score < b) {
            best = Some((setup, score));
        }
    }
    best.map(|(setup, score)| SetupBest {
        setup: setup.as_str().to_string(),
        score: round2(score),
    })
}
