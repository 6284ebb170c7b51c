//! Score and grade types
//!
//! - `Points`: a validated point value in 0-100
//! - `CompositeScore`: a main score with an optional extra (oral) exam
//! - `Grade` / `GradedComponent`: the derived grade of a point value

pub mod grade;
pub mod points;

pub use grade::{Grade, GradedComponent};
pub use points::{ComponentScore, CompositeScore, Points};
