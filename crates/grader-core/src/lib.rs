//! Grader Core - final exam grade calculation
//!
//! This crate turns submitted component scores into graded results:
//! - `types`: point values, composite scores and grades
//! - `normalizer`: composite (main + extra exam) resolution
//! - `aggregate`: weighted averages over present components
//! - `rules`: pass/fail rules and reason codes
//! - `program`: exam program definitions (components, weights, thresholds)
//! - `sheet`: validation of submitted records
//! - `calculator`: the calculation itself
//!
//! Everything here is synchronous and free of I/O.

pub mod aggregate;
pub mod calculator;
pub mod error;
pub mod normalizer;
pub mod outcome;
pub mod program;
pub mod rules;
pub mod sheet;
pub mod types;

// Re-export commonly used types
pub use calculator::{calculate, ExamCalculator};
pub use error::{CoreError, InputError, ProgramError};
pub use outcome::{ComponentOutcome, ExamOutcome, OutcomeNode};
pub use program::{ComponentKind, ComponentSpec, ExamProgram, OutputKeys};
pub use rules::{IncompletePolicy, PassRules, PassStatus, ReasonCode};
pub use sheet::{ComponentInput, ScoreSheet};
pub use types::{CompositeScore, Grade, GradedComponent, Points};
