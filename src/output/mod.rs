pub mod export;
pub mod formatter;

pub use export::{write_meet_csv, write_runs_csv, write_summary_csv};
pub use formatter::{
    format_meet_table, format_meet_tsv, format_run_table, format_run_tsv, format_score, format_score_detail,
    format_summary_table, format_summary_tsv, should_use_colors,
};
