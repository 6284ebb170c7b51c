//! Built-in exam programs
//!
//! All of them share AP1 (untracked) and the three AP2 composites; they
//! differ in where the project work sits and how it enters the overall result.

use super::component::ComponentSpec;
use super::{ExamProgram, OutputKeys};
use crate::rules::PassRules;

pub const AE_PROJECT_WORK: &str = "ae-project-work";
pub const AE_FLAT_PROJECT_WORK: &str = "ae-flat-project-work";
pub const AE_NESTED_PROJECT_WORK: &str = "ae-nested-project-work";
pub const ML: &str = "ml";

/// Ids of all built-in programs, default first
pub const BUILTIN_PROGRAMS: [&str; 4] =
    [AE_PROJECT_WORK, AE_FLAT_PROJECT_WORK, AE_NESTED_PROJECT_WORK, ML];

fn ap1() -> ComponentSpec {
    ComponentSpec::score("AP1", 0.20).with_alias("ap1")
}

fn ap2_parts() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::composite("planning", 0.10).tracked(),
        ComponentSpec::composite("development", 0.10).tracked(),
        ComponentSpec::composite("economy", 0.10).tracked(),
    ]
}

fn ap2() -> ComponentSpec {
    ComponentSpec::section("AP2", ap2_parts()).with_alias("ap2")
}

fn project_work(key: &str) -> ComponentSpec {
    ComponentSpec::subgroup(
        key,
        0.50,
        vec![
            ComponentSpec::score("project", 0.5),
            ComponentSpec::score("presentation", 0.5),
        ],
    )
    .tracked()
}

fn program(id: &str, name: &str, components: Vec<ComponentSpec>) -> ExamProgram {
    ExamProgram {
        id: id.to_string(),
        name: Some(name.to_string()),
        components,
        rules: PassRules::default(),
        output: OutputKeys::default(),
    }
}

/// Project work averaged as its own subgroup, weighted 50%
pub(super) fn ae_project_work() -> ExamProgram {
    program(
        AE_PROJECT_WORK,
        "Application development, project work as subgroup",
        vec![ap1(), ap2(), project_work("PW").with_alias("pw")],
    )
}

/// Project work nested under AP2. AP2 reports its own average; the outcome
/// uses `Overall` and `Status` at the top level.
pub(super) fn ae_nested_project_work() -> ExamProgram {
    let mut parts = ap2_parts();
    parts.push(project_work("pw").with_alias("PW"));
    let mut program = program(
        AE_NESTED_PROJECT_WORK,
        "Application development, project work within AP2",
        vec![
            ap1(),
            ComponentSpec::section("AP2", parts)
                .with_alias("ap2")
                .reporting_overall(),
        ],
    );
    program.output = OutputKeys {
        overall: "Overall".to_string(),
        status: "Status".to_string(),
    };
    program
}

/// Project and presentation as separate 25% line items
pub(super) fn ae_flat_project_work() -> ExamProgram {
    program(
        AE_FLAT_PROJECT_WORK,
        "Application development, flat project work",
        vec![
            ap1(),
            ap2(),
            ComponentSpec::section(
                "PW",
                vec![
                    ComponentSpec::score("project", 0.25).tracked(),
                    ComponentSpec::score("presentation", 0.25).tracked(),
                ],
            )
            .with_alias("pw"),
        ],
    )
}

/// Earlier schema: ML1 is the presentation, ML2 the project
pub(super) fn ml() -> ExamProgram {
    program(
        ML,
        "Application development, ML scores",
        vec![
            ap1(),
            ap2(),
            ComponentSpec::section(
                "ML",
                vec![
                    ComponentSpec::score("presentation", 0.25)
                        .with_alias("ML1")
                        .tracked(),
                    ComponentSpec::score("project", 0.25)
                        .with_alias("ML2")
                        .tracked(),
                ],
            )
            .with_alias("ml"),
        ],
    )
}
