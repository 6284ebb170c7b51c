//! Composite score resolution
//!
//! A composite component (written main exam plus optional oral extra exam)
//! resolves to one point value weighted 2:1 in favor of the main exam.

use crate::types::{CompositeScore, Points};

const MAIN_SHARE: f64 = 2.0 / 3.0;
const EXTRA_SHARE: f64 = 1.0 / 3.0;

/// Resolve a composite into a single point value.
///
/// Absent `main` yields absent regardless of `extra`.
pub fn resolve_composite(score: &CompositeScore) -> Option<Points> {
    let main = score.main?;
    let value = match score.extra {
        None => main.as_f64(),
        Some(extra) => MAIN_SHARE * main.as_f64() + EXTRA_SHARE * extra.as_f64(),
    };
    Some(Points::from_f64(value))
}
