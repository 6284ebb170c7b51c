//! Point values

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point value in the inclusive range 0-100
///
/// Out-of-range values cannot be constructed, so everything downstream of
/// input validation may assume a valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Points(u8);

/// A possibly missing point value. `None` means "not submitted" and is
/// distinct from a submitted zero.
pub type ComponentScore = Option<Points>;

impl Points {
    pub const MIN: Points = Points(0);
    pub const MAX: Points = Points(100);

    /// Create a point value, rejecting anything outside 0-100
    pub fn new(value: i64) -> Result<Self, CoreError> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CoreError::PointsOutOfRange(value))
        }
    }

    /// Round a computed value half-to-even and clamp it into 0-100
    pub fn from_f64(value: f64) -> Self {
        let rounded = value.round_ties_even();
        if rounded.is_nan() {
            return Self::MIN;
        }
        Self(rounded.clamp(0.0, 100.0) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<i64> for Points {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Points> for u8 {
    fn from(points: Points) -> Self {
        points.0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A two-part exam component: a written main exam and an optional
/// supplementary oral exam
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeScore {
    #[serde(default)]
    pub main: Option<Points>,
    #[serde(default)]
    pub extra: Option<Points>,
}

impl CompositeScore {
    pub fn new(main: Option<Points>, extra: Option<Points>) -> Self {
        Self { main, extra }
    }

    /// A composite with only the main exam taken
    pub fn main_only(main: Points) -> Self {
        Self {
            main: Some(main),
            extra: None,
        }
    }
}
