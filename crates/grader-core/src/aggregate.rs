//! Weighted aggregation with renormalization
//!
//! Absent components are excluded from the denominator instead of counting
//! as zero, so a partial score sheet averages over what was submitted.

use crate::types::{GradedComponent, Points};

/// One weighted entry of a weight table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem {
    pub weight: f64,
    pub points: Option<Points>,
}

impl LineItem {
    pub fn new(weight: f64, points: Option<Points>) -> Self {
        Self { weight, points }
    }
}

/// Running weighted sum over the present line items of one level
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregate {
    pub weighted_sum: f64,
    pub present_weight_sum: f64,
}

impl Aggregate {
    pub fn add(&mut self, item: LineItem) {
        if let Some(points) = item.points {
            self.weighted_sum += item.weight * points.as_f64();
            self.present_weight_sum += item.weight;
        }
    }

    /// Renormalized average, absent when no weighted data is present
    pub fn points(&self) -> Option<Points> {
        if self.present_weight_sum > 0.0 {
            Some(Points::from_f64(self.weighted_sum / self.present_weight_sum))
        } else {
            None
        }
    }

    pub fn graded(&self) -> GradedComponent {
        GradedComponent::from_points(self.points())
    }
}

impl FromIterator<LineItem> for Aggregate {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        let mut aggregate = Aggregate::default();
        for item in iter {
            aggregate.add(item);
        }
        aggregate
    }
}
