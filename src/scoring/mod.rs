pub mod config;
pub mod engine;
pub mod numeric;
pub mod validation;

pub use config::*;
pub use engine::{compute_score, ScoreBreakdown, ScoreResult};
pub use validation::{validate_scoring, validate_tolerance};
