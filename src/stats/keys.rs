//! Normalized grouping keys.
//!
//! Keys are built from rounded, fixed-decimal strings so that runs whose raw
//! floats differ only below the rounding precision land in the same group.

use std::cmp::Ordering;
use std::fmt;

use crate::runs::types::RunInput;
use crate::scoring::numeric::{finite_or_zero, fixed};

/// Key used for runs without a usable target distance.
pub const NO_TRACK_KEY: &str = "none";

/// Target distance category, e.g. `"7.50"`, or [`NO_TRACK_KEY`].
///
/// Ordering is numeric ascending with the no-track group last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey(String);

impl TrackKey {
    /// Unset, zero, negative and non-finite targets all map to the no-track key.
    pub fn for_target(target_m: Option<f64>) -> Self {
        match target_m {
            Some(t) if t.is_finite() && t > 0.0 && fixed(t, 2) != "0.00" => Self(fixed(t, 2)),
            _ => Self(NO_TRACK_KEY.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the key, `None` for the no-track key.
    pub fn value(&self) -> Option<f64> {
        if self.is_untracked() {
            None
        } else {
            self.0.parse().ok()
        }
    }

    pub fn is_untracked(&self) -> bool {
        self.0 == NO_TRACK_KEY
    }
}

impl Ord for TrackKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for TrackKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mechanical setup: angle to 1 decimal, dial turns to 2, winds to whole numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetupKey(String);

impl SetupKey {
    pub fn new(car_angle_deg: f64, dial_turns: f64, winds: f64) -> Self {
        Self(format!(
            "{}° / {} turns / {} winds",
            fixed(car_angle_deg, 1),
            fixed(dial_turns, 2),
            fixed(winds, 0)
        ))
    }

    pub fn for_input(input: &RunInput) -> Self {
        Self::new(
            finite_or_zero(input.car_angle_deg),
            finite_or_zero(input.dial_turns),
            finite_or_zero(input.winds),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
