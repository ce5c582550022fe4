pub mod rank;
pub mod types;

pub use rank::{load_meet_sheet, rank_meet, score_team};
pub use types::{BestRun, MeetResult, MeetSheet, TeamEntry};
