use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_SCORE: f64 = 100.0;
pub const DEFAULT_DISTANCE_WEIGHT: f64 = 2.0;
pub const DEFAULT_TIME_WEIGHT: f64 = 1.0;
pub const DEFAULT_FAILED_DISTANCE_CM: f64 = 2500.0;
pub const DEFAULT_BUCKET_BONUS: f64 = 100.0;
pub const DEFAULT_COMPETITION_PENALTY: f64 = 150.0;
pub const DEFAULT_CONSTRUCTION_PENALTY: f64 = 300.0;

/// Scoring constants.
///
/// Scores are "lower is better": every distance, time and penalty point is
/// added on top of the base score, and the bucket bonus is subtracted.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   base_score: 100
///   distance_weight: 2.0
///   failed_distance_cm: 2500
///   bucket_bonus: 100
///   competition_penalty: 150
///   construction_penalty: 300
/// ```
///
/// Changing these only affects runs scored afterwards. Saved runs keep the
/// score they were stored with.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Fixed starting offset (default: 100)
    #[serde(default)]
    pub base_score: Option<f64>,

    /// Points per centimeter of measured distance (default: 2.0)
    #[serde(default)]
    pub distance_weight: Option<f64>,

    /// Points per second of average time (default: 1.0)
    #[serde(default)]
    pub time_weight: Option<f64>,

    /// Distance used in place of the measurement for a failed run (default: 2500)
    #[serde(default)]
    pub failed_distance_cm: Option<f64>,

    /// Points subtracted when the bucket bonus is earned (default: 100)
    #[serde(default)]
    pub bucket_bonus: Option<f64>,

    /// Points added for a competition rule violation (default: 150)
    #[serde(default)]
    pub competition_penalty: Option<f64>,

    /// Points added for a construction rule violation (default: 300)
    #[serde(default)]
    pub construction_penalty: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: Some(DEFAULT_BASE_SCORE),
            distance_weight: Some(DEFAULT_DISTANCE_WEIGHT),
            time_weight: Some(DEFAULT_TIME_WEIGHT),
            failed_distance_cm: Some(DEFAULT_FAILED_DISTANCE_CM),
            bucket_bonus: Some(DEFAULT_BUCKET_BONUS),
            competition_penalty: Some(DEFAULT_COMPETITION_PENALTY),
            construction_penalty: Some(DEFAULT_CONSTRUCTION_PENALTY),
        }
    }
}

impl ScoringConfig {
    pub fn base_score(&self) -> f64 {
        self.base_score.unwrap_or(DEFAULT_BASE_SCORE)
    }

    pub fn distance_weight(&self) -> f64 {
        self.distance_weight.unwrap_or(DEFAULT_DISTANCE_WEIGHT)
    }

    pub fn time_weight(&self) -> f64 {
        self.time_weight.unwrap_or(DEFAULT_TIME_WEIGHT)
    }

    pub fn failed_distance_cm(&self) -> f64 {
        self.failed_distance_cm.unwrap_or(DEFAULT_FAILED_DISTANCE_CM)
    }

    pub fn bucket_bonus(&self) -> f64 {
        self.bucket_bonus.unwrap_or(DEFAULT_BUCKET_BONUS)
    }

    pub fn competition_penalty(&self) -> f64 {
        self.competition_penalty
            .unwrap_or(DEFAULT_COMPETITION_PENALTY)
    }

    pub fn construction_penalty(&self) -> f64 {
        self.construction_penalty
            .unwrap_or(DEFAULT_CONSTRUCTION_PENALTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.base_score, Some(100.0));
        assert_eq!(config.distance_weight, Some(2.0));
        assert_eq!(config.failed_distance_cm, Some(2500.0));
        assert_eq!(config.competition_penalty, Some(150.0));
        assert_eq!(config.construction_penalty, Some(300.0));
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
base_score: 50
bucket_bonus: 75
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.base_score(), 50.0);
        assert_eq!(config.bucket_bonus(), 75.0);
        // Unset fields fall back to the standard constants
        assert!(config.distance_weight.is_none());
        assert_eq!(config.distance_weight(), 2.0);
        assert_eq!(config.construction_penalty(), 300.0);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.base_score.is_none());
        assert_eq!(config.base_score(), 100.0);
        assert_eq!(config.failed_distance_cm(), 2500.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "base_scor: 100\n";
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
