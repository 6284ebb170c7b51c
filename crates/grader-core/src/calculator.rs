//! Grade calculation
//!
//! Walks the program tree once: leaves are resolved (composites through the
//! normalizer), graded, and added to the weight table of their level;
//! subgroups aggregate their own level first and enter the parent as a
//! single line item. A reporting section averages the line items it added
//! for display only. Tracked values are collected on the way for the rule
//! engine.

use crate::aggregate::{Aggregate, LineItem};
use crate::error::{InputError, ProgramError};
use crate::normalizer::resolve_composite;
use crate::outcome::{ComponentOutcome, ExamOutcome, OutcomeNode};
use crate::program::{ComponentKind, ComponentSpec, ExamProgram};
use crate::sheet::{ComponentInput, ScoreSheet};
use crate::types::{GradedComponent, Points};
use serde_json::Value;
use std::sync::Arc;

/// Calculate the outcome of a score sheet. Pure: same input, same output.
pub fn calculate(program: &ExamProgram, sheet: &ScoreSheet) -> ExamOutcome {
    let mut total = Vec::new();
    let mut tracked = Vec::new();
    let components =
        resolve_level(&program.components, &sheet.components, &mut total, &mut tracked);
    let overall = total.into_iter().collect::<Aggregate>().graded();
    let status = program.rules.evaluate(&tracked, overall.points);

    ExamOutcome {
        program: program.id.clone(),
        name: sheet.name.clone(),
        components,
        overall,
        status,
        output: program.output.clone(),
    }
}

fn resolve_level(
    specs: &[ComponentSpec],
    inputs: &[Option<ComponentInput>],
    level: &mut Vec<LineItem>,
    tracked: &mut Vec<Option<Points>>,
) -> Vec<ComponentOutcome> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let input = inputs.get(index).and_then(Option::as_ref);
            ComponentOutcome {
                key: spec.key.clone(),
                result: resolve_component(spec, input, level, tracked),
            }
        })
        .collect()
}

fn resolve_component(
    spec: &ComponentSpec,
    input: Option<&ComponentInput>,
    level: &mut Vec<LineItem>,
    tracked: &mut Vec<Option<Points>>,
) -> OutcomeNode {
    match &spec.kind {
        ComponentKind::Section {
            components,
            report_overall,
        } => {
            let start = level.len();
            let parts = resolve_level(components, group_inputs(input), level, tracked);
            let overall = report_overall
                .then(|| level[start..].iter().copied().collect::<Aggregate>().graded());
            OutcomeNode::Section { parts, overall }
        }
        ComponentKind::Subgroup { components } => {
            let mut subgroup = Vec::new();
            let parts = resolve_level(components, group_inputs(input), &mut subgroup, tracked);
            let overall = subgroup.into_iter().collect::<Aggregate>().graded();
            add_line_item(spec, overall.points, level, tracked);
            OutcomeNode::Subgroup { parts, overall }
        }
        ComponentKind::Score | ComponentKind::Composite => {
            let points = match input {
                Some(ComponentInput::Score(points)) => Some(*points),
                Some(ComponentInput::Composite(score)) => resolve_composite(score),
                _ => None,
            };
            add_line_item(spec, points, level, tracked);
            OutcomeNode::Graded(GradedComponent::from_points(points))
        }
    }
}

fn group_inputs(input: Option<&ComponentInput>) -> &[Option<ComponentInput>] {
    match input {
        Some(ComponentInput::Group(children)) => children,
        _ => &[],
    }
}

fn add_line_item(
    spec: &ComponentSpec,
    points: Option<Points>,
    level: &mut Vec<LineItem>,
    tracked: &mut Vec<Option<Points>>,
) {
    level.push(LineItem::new(spec.weight.unwrap_or_default(), points));
    if spec.tracked {
        tracked.push(points);
    }
}

/// Calculator bound to one validated exam program
#[derive(Debug, Clone)]
pub struct ExamCalculator {
    program: Arc<ExamProgram>,
}

impl Default for ExamCalculator {
    fn default() -> Self {
        Self {
            program: Arc::new(ExamProgram::default()),
        }
    }
}

impl ExamCalculator {
    pub fn new(program: ExamProgram) -> Result<Self, ProgramError> {
        program.validate()?;
        Ok(Self {
            program: Arc::new(program),
        })
    }

    pub fn program(&self) -> &ExamProgram {
        &self.program
    }

    /// Validate a submitted record against the program
    pub fn read_sheet(&self, record: &Value) -> Result<ScoreSheet, InputError> {
        ScoreSheet::from_json(&self.program, record)
    }

    pub fn calculate(&self, sheet: &ScoreSheet) -> ExamOutcome {
        calculate(&self.program, sheet)
    }

    pub fn calculate_record(&self, record: &Value) -> Result<ExamOutcome, InputError> {
        let sheet = self.read_sheet(record)?;
        Ok(self.calculate(&sheet))
    }
}
