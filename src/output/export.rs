//! CSV export with a header row, for spreadsheets.

use anyhow::{Context, Result};
use std::io::Write;

use crate::meet::MeetResult;
use crate::runs::types::Run;
use crate::stats::{SetupKey, Summary, TrackKey};

use super::formatter::format_score;

fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Write runs as CSV, one row per run with every raw input and the cached score.
pub fn write_runs_csv<W: Write>(writer: W, runs: &[&Run]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "id",
        "created_at",
        "track",
        "setup",
        "target_distance_m",
        "vehicle_distance_cm",
        "time1",
        "time2",
        "time3",
        "car_angle_deg",
        "dial_turns",
        "winds",
        "bucket_bonus",
        "failed_run",
        "competition_violation",
        "construction_violation",
        "time_avg",
        "score",
        "notes",
    ])?;

    for run in runs {
        let input = &run.input;
        csv.write_record([
            run.id.clone(),
            run.created_at.to_rfc3339(),
            TrackKey::for_target(input.target_distance_m).to_string(),
            SetupKey::for_input(input).to_string(),
            optional_number(input.target_distance_m),
            optional_number(input.vehicle_distance_cm),
            optional_number(input.time1),
            optional_number(input.time2),
            optional_number(input.time3),
            optional_number(input.car_angle_deg),
            optional_number(input.dial_turns),
            optional_number(input.winds),
            flag(input.bucket_bonus).to_string(),
            flag(input.failed_run).to_string(),
            flag(input.competition_violation).to_string(),
            flag(input.construction_violation).to_string(),
            format_score(run.time_avg),
            format_score(run.score),
            run.notes.clone(),
        ])?;
    }

    csv.flush().context("Failed to write runs CSV")?;
    Ok(())
}

/// Write a summary as CSV. `NoMatches` produces just the header.
pub fn write_summary_csv<W: Write>(writer: W, summary: &Summary) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "track",
        "runs",
        "avg_score",
        "best_score",
        "best_setup_by_avg",
        "best_setup_avg_score",
        "best_setup_avg_runs",
        "best_setup_by_single",
        "best_setup_single_score",
    ])?;

    for row in summary.rows() {
        let avg = row.best_setup_by_avg.as_ref();
        let single = row.best_setup_by_single.as_ref();
        csv.write_record([
            row.track.clone(),
            row.runs.to_string(),
            row.avg_score.map(format_score).unwrap_or_default(),
            row.best_score.map(format_score).unwrap_or_default(),
            avg.map(|s| s.setup.clone()).unwrap_or_default(),
            avg.map(|s| format_score(s.avg_score)).unwrap_or_default(),
            avg.map(|s| s.runs.to_string()).unwrap_or_default(),
            single.map(|s| s.setup.clone()).unwrap_or_default(),
            single.map(|s| format_score(s.score)).unwrap_or_default(),
        ])?;
    }

    csv.flush().context("Failed to write summary CSV")?;
    Ok(())
}

/// Write ranked meet results as CSV.
pub fn write_meet_csv<W: Write>(writer: W, results: &[MeetResult]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "place", "team", "run1", "run2", "best", "best_run", "penalty", "final",
    ])?;

    for (idx, result) in results.iter().enumerate() {
        csv.write_record([
            (idx + 1).to_string(),
            result.team.clone(),
            format_score(result.run1.total),
            format_score(result.run2.total),
            format_score(result.best),
            result.best_run.number().to_string(),
            format_score(result.penalty),
            format_score(result.final_score),
        ])?;
    }

    csv.flush().context("Failed to write meet CSV")?;
    Ok(())
}
