use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Competitor whose runs are read and written when no --user is given
    #[serde(default)]
    pub user: Option<String>,

    /// Run store location (defaults to ~/.config/setup-scout/runs.json)
    #[serde(default)]
    pub store_path: Option<String>,

    /// Tolerance for `summary --target` when --tolerance isn't passed
    #[serde(default)]
    pub tolerance_m: Option<f64>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}
