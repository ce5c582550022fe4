use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::meet::MeetResult;
use crate::runs::types::Run;
use crate::scoring::ScoreResult;
use crate::stats::{SetupKey, Summary, SummaryRow, TrackKey};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with the two decimals it is stored with
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

fn format_optional(score: Option<f64>) -> String {
    score.map(format_score).unwrap_or_else(|| "-".to_string())
}

/// Multi-line breakdown of a single scored run
pub fn format_score_detail(result: &ScoreResult, base_score: f64, use_colors: bool) -> String {
    let total = format_score(result.total);
    let mut lines = vec![if use_colors {
        format!("Score: {}", total.bold())
    } else {
        format!("Score: {}", total)
    }];

    lines.push(format!("  Base: {}", format_score(base_score)));
    for (label, value) in result.breakdown.components() {
        let detail = match label {
            "Distance" => format!(" ({} cm)", format_score(result.breakdown.dist_cm)),
            "Time" => format!(" (avg {} s)", format_score(result.time_avg)),
            _ => String::new(),
        };
        lines.push(format!("  {}: {}{}", label, format_score(value), detail));
    }

    if result.failed {
        let note = "  Failed run: scored at the worst-case distance, time ignored";
        lines.push(if use_colors {
            note.red().to_string()
        } else {
            note.to_string()
        });
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn track_label(run: &Run) -> String {
    let key = TrackKey::for_target(run.input.target_distance_m);
    if key.is_untracked() {
        "-".to_string()
    } else {
        format!("{}m", key)
    }
}

/// Display width of the fixed run-table columns plus their separators.
fn columns_width(columns: &[&str]) -> usize {
    columns.iter().map(|c| c.chars().count()).sum::<usize>() + 2 * columns.len()
}

/// Format runs as a table, oldest first as given.
/// Columns: index, saved at, track, setup, score, notes.
/// Index column is 1-based and right-aligned; it is what `delete` accepts.
pub fn format_run_table(runs: &[&Run], use_colors: bool) -> String {
    if runs.is_empty() {
        return "No runs recorded.".to_string();
    }

    let term_width = get_terminal_width();

    runs.iter()
        .enumerate()
        .map(|(idx, run)| {
            let index_str = format!("{:>3}.", idx + 1);
            let when = run.created_at.format("%Y-%m-%d %H:%M").to_string();
            let track = format!("{:>7}", track_label(run));
            let setup = SetupKey::for_input(&run.input).to_string();
            let score = format!("{:>9}", format_score(run.score));

            let fixed_width = columns_width(&[&index_str, &when, &track, &setup, &score]);
            let notes = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_text(&run.notes, width - fixed_width),
                Some(_) => truncate_text(&run.notes, 10),
                None => run.notes.clone(),
            };

            let line = if use_colors {
                format!(
                    "{} {}  {}  {}  {}  {}",
                    index_str.dimmed(),
                    when.dimmed(),
                    track.cyan(),
                    setup,
                    score.bold(),
                    notes
                )
            } else {
                format!(
                    "{} {}  {}  {}  {}  {}",
                    index_str, when, track, setup, score, notes
                )
            };
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format runs as tab-separated values for scripting
/// Columns: id, created_at, track, setup, score, time_avg, notes (no headers)
pub fn format_run_tsv(runs: &[&Run]) -> String {
    runs.iter()
        .map(|run| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                run.id,
                run.created_at.to_rfc3339(),
                TrackKey::for_target(run.input.target_distance_m),
                SetupKey::for_input(&run.input),
                format_score(run.score),
                format_score(run.time_avg),
                run.notes.replace(['\t', '\n'], " ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_best_setups(row: &SummaryRow) -> (String, String) {
    let by_avg = row
        .best_setup_by_avg
        .as_ref()
        .map(|s| format!("{} (avg {}, n={})", s.setup, format_score(s.avg_score), s.runs))
        .unwrap_or_else(|| "-".to_string());
    let by_single = row
        .best_setup_by_single
        .as_ref()
        .map(|s| format!("{} ({})", s.setup, format_score(s.score)))
        .unwrap_or_else(|| "-".to_string());
    (by_avg, by_single)
}

/// Format a summary with one block per track
pub fn format_summary_table(summary: &Summary, use_colors: bool) -> String {
    let rows = match summary {
        Summary::NoMatches => return "No matching runs.".to_string(),
        Summary::Rows(rows) => rows,
    };

    rows.iter()
        .map(|row| {
            let track = if row.target_m.is_some() {
                format!("Track {}m", row.track)
            } else {
                "No target".to_string()
            };
            let header = format!(
                "{}  runs {}  avg {}  best {}",
                track,
                row.runs,
                format_optional(row.avg_score),
                format_optional(row.best_score)
            );
            let (by_avg, by_single) = describe_best_setups(row);

            if use_colors {
                format!(
                    "{}\n  best setup by average: {}\n  best setup by single:  {}",
                    header.bold(),
                    by_avg.green(),
                    by_single.green()
                )
            } else {
                format!(
                    "{}\n  best setup by average: {}\n  best setup by single:  {}",
                    header, by_avg, by_single
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a summary as tab-separated values (no headers, no colors)
/// Columns: track, runs, avg, best, avg_setup, avg_setup_score, avg_setup_runs,
/// single_setup, single_setup_score
pub fn format_summary_tsv(summary: &Summary) -> String {
    summary
        .rows()
        .iter()
        .map(|row| {
            let (avg_setup, avg_score, avg_runs) = match &row.best_setup_by_avg {
                Some(s) => (s.setup.clone(), format_score(s.avg_score), s.runs.to_string()),
                None => (String::new(), String::new(), String::new()),
            };
            let (single_setup, single_score) = match &row.best_setup_by_single {
                Some(s) => (s.setup.clone(), format_score(s.score)),
                None => (String::new(), String::new()),
            };
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                row.track,
                row.runs,
                row.avg_score.map(format_score).unwrap_or_default(),
                row.best_score.map(format_score).unwrap_or_default(),
                avg_setup,
                avg_score,
                avg_runs,
                single_setup,
                single_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format meet results as tab-separated values (no headers, no colors)
/// Columns: place, team, run1, run2, best, best_run, penalty, final
pub fn format_meet_tsv(results: &[MeetResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                idx + 1,
                result.team,
                format_score(result.run1.total),
                format_score(result.run2.total),
                format_score(result.best),
                result.best_run.number(),
                format_score(result.penalty),
                format_score(result.final_score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format meet results in ranked order
/// Columns: place, team, run 1, run 2, best (with run number), penalty, final
pub fn format_meet_table(results: &[MeetResult], use_colors: bool) -> String {
    if results.is_empty() {
        return "No teams in meet sheet.".to_string();
    }

    let team_width = results
        .iter()
        .map(|r| r.team.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let header = format!(
        "{:>3}  {:<team_width$}  {:>9}  {:>9}  {:>12}  {:>8}  {:>9}",
        "#", "Team", "Run 1", "Run 2", "Best", "Penalty", "Final",
        team_width = team_width
    );

    let lines = results.iter().enumerate().map(|(idx, result)| {
        let best = format!("{} (#{})", format_score(result.best), result.best_run.number());
        let final_score = format!("{:>9}", format_score(result.final_score));
        format!(
            "{:>3}  {:<team_width$}  {:>9}  {:>9}  {:>12}  {:>8}  {}",
            idx + 1,
            result.team,
            format_score(result.run1.total),
            format_score(result.run2.total),
            best,
            format_score(result.penalty),
            if use_colors {
                final_score.bold().to_string()
            } else {
                final_score
            },
            team_width = team_width
        )
    });

    std::iter::once(if use_colors {
        header.dimmed().to_string()
    } else {
        header
    })
    .chain(lines)
    .collect::<Vec<_>>()
    .join("\n")
}
