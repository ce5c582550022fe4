//! Numeric coercion and rounding shared by scoring and aggregation.

/// Round to two decimals, the precision every reported score uses.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to `places` decimals. Non-finite input becomes 0 and negative zero
/// is normalized so it never formats as "-0.0".
///
/// Values too large to scale are returned as is; at that magnitude an `f64`
/// has no fractional digits left to round.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Clamp an arithmetic result back into the finite range: overflow saturates
/// to `±f64::MAX`, NaN becomes 0.
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-f64::MAX, f64::MAX)
    }
}

/// Format with fixed decimals after rounding, e.g. `fixed(4.999, 2) == "5.00"`.
pub fn fixed(value: f64, places: u32) -> String {
    format!("{:.*}", places as usize, round_to(value, places))
}

/// A finite, non-negative measurement, or `None`.
pub fn valid_measurement(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

/// Coerce an optional value to a finite number, defaulting to 0.
pub fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Arithmetic mean of the finite values, `None` when there are none.
///
/// When the plain sum overflows, each value is divided by the count before
/// summing instead, so the result stays finite.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let count = finite.len() as f64;
    let sum: f64 = finite.iter().sum();
    if sum.is_finite() {
        Some(sum / count)
    } else {
        Some(saturate(finite.iter().map(|v| v / count).sum()))
    }
}

/// Smallest finite value, `None` when there are none.
pub fn min_finite<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |best: Option<f64>, v| match best {
            Some(b) if b <= v => Some(b),
            _ => Some(v),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(710.004), 710.0);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(f64::NAN), 0.0);
        assert_eq!(round2(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_round_to_keeps_values_too_large_to_scale() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert_eq!(round2(-f64::MAX), -f64::MAX);
        assert_eq!(round_to(1e308, 1), 1e308);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(12.5), 12.5);
        assert_eq!(saturate(f64::INFINITY), f64::MAX);
        assert_eq!(saturate(f64::NEG_INFINITY), -f64::MAX);
        assert_eq!(saturate(f64::NAN), 0.0);
    }

    #[test]
    fn test_fixed_huge_value_is_digits() {
        let text = fixed(1e308, 2);
        assert!(text.ends_with(".00"));
        assert!(text.starts_with('1'));
        assert_eq!(text.len(), 309 + 3);
    }

    #[test]
    fn test_fixed_normalizes_negative_zero() {
        assert_eq!(fixed(-0.04, 1), "0.0");
        assert_eq!(fixed(-0.0, 2), "0.00");
    }

    #[test]
    fn test_fixed_rounds() {
        assert_eq!(fixed(4.999, 2), "5.00");
        assert_eq!(fixed(5.001, 2), "5.00");
        assert_eq!(fixed(12.04, 1), "12.0");
        assert_eq!(fixed(39.6, 0), "40");
    }

    #[test]
    fn test_valid_measurement() {
        assert_eq!(valid_measurement(Some(5.0)), Some(5.0));
        assert_eq!(valid_measurement(Some(0.0)), Some(0.0));
        assert_eq!(valid_measurement(Some(-1.0)), None);
        assert_eq!(valid_measurement(Some(f64::NAN)), None);
        assert_eq!(valid_measurement(None), None);
    }

    #[test]
    fn test_mean_skips_non_finite() {
        assert_eq!(mean(vec![1.0, f64::NAN, 3.0]), Some(2.0));
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean(vec![f64::INFINITY]), None);
    }

    #[test]
    fn test_mean_of_huge_values_does_not_overflow() {
        assert_eq!(mean(vec![1e308, 1e308]), Some(1e308));
        assert_eq!(mean(vec![f64::MAX, f64::MAX, f64::MAX]).map(f64::is_finite), Some(true));
    }

    #[test]
    fn test_min_finite() {
        assert_eq!(min_finite(vec![3.0, 1.0, 2.0]), Some(1.0));
        assert_eq!(min_finite(vec![f64::NAN, 4.0]), Some(4.0));
        assert_eq!(min_finite(Vec::<f64>::new()), None);
    }
}
