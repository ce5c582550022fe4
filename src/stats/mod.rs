pub mod groups;
pub mod keys;
pub mod summary;

pub use groups::{group_runs, OrderedGroups, TrackBucket};
pub use keys::{SetupKey, TrackKey, NO_TRACK_KEY};
pub use summary::{
    summarize, SetupAverage, SetupBest, Summary, SummaryRow, TargetFilter, DEFAULT_TOLERANCE_M,
};
