use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let fields = [
        ("base_score", config.base_score, false),
        ("distance_weight", config.distance_weight, false),
        ("time_weight", config.time_weight, false),
        ("failed_distance_cm", config.failed_distance_cm, true),
        ("bucket_bonus", config.bucket_bonus, true),
        ("competition_penalty", config.competition_penalty, true),
        ("construction_penalty", config.construction_penalty, true),
    ];

    for (name, value, non_negative) in fields {
        let Some(value) = value else {
            continue;
        };
        if !value.is_finite() {
            errors.push(format!("scoring.{}: must be a finite number", name));
        } else if non_negative && value < 0.0 {
            errors.push(format!("scoring.{}: must be non-negative", name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a filter tolerance in meters.
pub fn validate_tolerance(tolerance: f64) -> Result<(), String> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        Err(format!(
            "tolerance_m: must be a non-negative number, got {}",
            tolerance
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_negative_penalty() {
        let config = ScoringConfig {
            competition_penalty: Some(-150.0),
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.competition_penalty"));
    }

    #[test]
    fn test_negative_base_score_allowed() {
        let config = ScoringConfig {
            base_score: Some(-10.0),
            ..ScoringConfig::default()
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_non_finite_weight() {
        let config = ScoringConfig {
            distance_weight: Some(f64::NAN),
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.distance_weight"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            bucket_bonus: Some(-1.0),
            failed_distance_cm: Some(-2500.0),
            time_weight: Some(f64::INFINITY),
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validate_tolerance() {
        assert!(validate_tolerance(0.005).is_ok());
        assert!(validate_tolerance(0.0).is_ok());
        assert!(validate_tolerance(-0.1).is_err());
        assert!(validate_tolerance(f64::NAN).is_err());
    }
}
