//! Point to grade mapping

use super::points::Points;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Ordinal grade, 1 (best) to 6 (worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Grade {
    VeryGood = 1,
    Good = 2,
    Satisfactory = 3,
    Sufficient = 4,
    Poor = 5,
    Insufficient = 6,
}

/// Inclusive lower bounds, checked from the best grade down
const GRADE_THRESHOLDS: [(u8, Grade); 5] = [
    (92, Grade::VeryGood),
    (81, Grade::Good),
    (67, Grade::Satisfactory),
    (50, Grade::Sufficient),
    (30, Grade::Poor),
];

impl Grade {
    pub fn from_points(points: Points) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(lower, _)| points.value() >= *lower)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::Insufficient)
    }

    /// Grade for a raw integer; absent when outside 0-100
    pub fn from_raw(points: i64) -> Option<Self> {
        Points::new(points).ok().map(Self::from_points)
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Grade {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Grade::VeryGood),
            2 => Ok(Grade::Good),
            3 => Ok(Grade::Satisfactory),
            4 => Ok(Grade::Sufficient),
            5 => Ok(Grade::Poor),
            6 => Ok(Grade::Insufficient),
            other => Err(CoreError::GradeOutOfRange(other)),
        }
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.value()
    }
}

/// Grade for an optional point value
pub fn grade_for(points: Option<Points>) -> Option<Grade> {
    points.map(Grade::from_points)
}

/// Points together with their derived grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedComponent {
    pub points: Option<Points>,
    pub grade: Option<Grade>,
}

impl GradedComponent {
    pub fn from_points(points: Option<Points>) -> Self {
        Self {
            points,
            grade: grade_for(points),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.points.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(points: i64) -> u8 {
        Grade::from_raw(points).unwrap().value()
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade(100), 1);
        assert_eq!(grade(92), 1);
        assert_eq!(grade(91), 2);
        assert_eq!(grade(81), 2);
        assert_eq!(grade(80), 3);
        assert_eq!(grade(67), 3);
        assert_eq!(grade(66), 4);
        assert_eq!(grade(50), 4);
        assert_eq!(grade(49), 5);
        assert_eq!(grade(30), 5);
        assert_eq!(grade(29), 6);
        assert_eq!(grade(0), 6);
    }

    #[test]
    fn test_grade_absent_or_out_of_range() {
        assert_eq!(grade_for(None), None);
        assert_eq!(Grade::from_raw(-1), None);
        assert_eq!(Grade::from_raw(101), None);
    }

    #[test]
    fn test_grade_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Grade::Good).unwrap(), "2");
        let grade: Grade = serde_json::from_str("6").unwrap();
        assert_eq!(grade, Grade::Insufficient);
        assert!(serde_json::from_str::<Grade>("7").is_err());
    }

    #[test]
    fn test_graded_component() {
        let graded = GradedComponent::from_points(Some(Points::new(77).unwrap()));
        assert_eq!(graded.grade, Some(Grade::Satisfactory));
        assert!(!graded.is_absent());

        let absent = GradedComponent::from_points(None);
        assert_eq!(absent, GradedComponent::default());
        assert_eq!(
            serde_json::to_value(absent).unwrap(),
            serde_json::json!({"points": null, "grade": null})
        );
    }
}
