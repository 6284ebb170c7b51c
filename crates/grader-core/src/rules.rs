//! Pass/fail rules
//!
//! Three independent rules are evaluated over the tracked components and the
//! overall result. Every triggered rule contributes a reason code, in rule
//! order.

use crate::types::Points;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a triggered fail rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// A tracked component is below the hard minimum
    ComponentBelowMinimum,
    /// More than the allowed number of tracked components are weak
    MultipleWeakComponents,
    /// The overall result is below the pass mark
    OverallBelowPassMark,
    /// No weighted data at all (only under `IncompletePolicy::Incomplete`)
    Incomplete,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 4] = [
        ReasonCode::ComponentBelowMinimum,
        ReasonCode::MultipleWeakComponents,
        ReasonCode::OverallBelowPassMark,
        ReasonCode::Incomplete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::ComponentBelowMinimum => "COMPONENT_BELOW_MINIMUM",
            ReasonCode::MultipleWeakComponents => "MULTIPLE_WEAK_COMPONENTS",
            ReasonCode::OverallBelowPassMark => "OVERALL_BELOW_PASS_MARK",
            ReasonCode::Incomplete => "INCOMPLETE",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to report when no weighted data is present at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompletePolicy {
    /// No rule triggers, so the empty sheet passes
    #[default]
    Vacuous,
    /// An absent overall fails with `ReasonCode::Incomplete`
    Incomplete,
}

/// Verdict of the rule engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStatus {
    pub passed: bool,
    pub reasons: Vec<ReasonCode>,
}

impl PassStatus {
    pub fn has_reason(&self, code: ReasonCode) -> bool {
        self.reasons.contains(&code)
    }
}

/// Thresholds of the fail rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassRules {
    /// Tracked components strictly below this fail outright
    pub minimum_points: u8,
    /// Tracked components strictly below this count as weak
    pub weak_points: u8,
    /// Number of weak components still tolerated
    pub max_weak_components: usize,
    /// Overall results strictly below this fail
    pub pass_mark: u8,
    pub incomplete_policy: IncompletePolicy,
}

impl Default for PassRules {
    fn default() -> Self {
        Self {
            minimum_points: 30,
            weak_points: 50,
            max_weak_components: 1,
            pass_mark: 50,
            incomplete_policy: IncompletePolicy::Vacuous,
        }
    }
}

impl PassRules {
    pub fn with_incomplete_policy(mut self, policy: IncompletePolicy) -> Self {
        self.incomplete_policy = policy;
        self
    }

    /// Evaluate all rules. Absent points never trigger a rule.
    pub fn evaluate(&self, tracked: &[Option<Points>], overall: Option<Points>) -> PassStatus {
        let present: Vec<u8> = tracked.iter().flatten().map(|p| p.value()).collect();
        let mut reasons = Vec::new();

        if present.iter().any(|&p| p < self.minimum_points) {
            reasons.push(ReasonCode::ComponentBelowMinimum);
        }

        let weak = present.iter().filter(|&&p| p < self.weak_points).count();
        if weak > self.max_weak_components {
            reasons.push(ReasonCode::MultipleWeakComponents);
        }

        match overall {
            Some(points) if points.value() < self.pass_mark => {
                reasons.push(ReasonCode::OverallBelowPassMark);
            }
            None if self.incomplete_policy == IncompletePolicy::Incomplete => {
                reasons.push(ReasonCode::Incomplete);
            }
            _ => {}
        }

        PassStatus {
            passed: reasons.is_empty(),
            reasons,
        }
    }
}
