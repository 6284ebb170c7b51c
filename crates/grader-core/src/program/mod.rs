//! Exam programs
//!
//! An exam program is the immutable configuration the calculator runs
//! against: which components exist, how they nest, their weights, which of
//! them the pass/fail rules track, and the rule thresholds. Program variants
//! are plain data, selected by id or loaded from a YAML/JSON definition.

pub mod builtin;
pub mod component;

pub use builtin::{
    AE_FLAT_PROJECT_WORK, AE_NESTED_PROJECT_WORK, AE_PROJECT_WORK, BUILTIN_PROGRAMS, ML,
};
pub use component::{ComponentKind, ComponentSpec};

use crate::error::ProgramError;
use crate::rules::PassRules;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Record fields that are not components
pub const META_FIELDS: [&str; 3] = ["id", "name", "Name"];

/// Key of the program id in the outcome record
pub const PROGRAM_KEY: &str = "program";

/// Key of a group's own aggregate in the outcome record
pub const OVERALL_KEY: &str = "overall";

/// Names of the top-level total and status entries of the outcome record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputKeys {
    pub overall: String,
    pub status: String,
}

impl Default for OutputKeys {
    fn default() -> Self {
        Self {
            overall: OVERALL_KEY.to_string(),
            status: "status".to_string(),
        }
    }
}

impl OutputKeys {
    fn validate(&self) -> Result<(), ProgramError> {
        for key in [&self.overall, &self.status] {
            if key.is_empty() || key == PROGRAM_KEY || META_FIELDS.contains(&key.as_str()) {
                return Err(ProgramError::InvalidOutputKey(key.clone()));
            }
        }
        if self.overall == self.status {
            return Err(ProgramError::InvalidOutputKey(self.status.clone()));
        }
        Ok(())
    }
}

/// Exam program definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamProgram {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub components: Vec<ComponentSpec>,

    #[serde(default)]
    pub rules: PassRules,

    #[serde(default)]
    pub output: OutputKeys,
}

impl Default for ExamProgram {
    fn default() -> Self {
        builtin::ae_project_work()
    }
}

impl ExamProgram {
    /// Create a program and check its invariants
    pub fn new(
        id: impl Into<String>,
        components: Vec<ComponentSpec>,
    ) -> Result<Self, ProgramError> {
        let program = Self {
            id: id.into(),
            name: None,
            components,
            rules: PassRules::default(),
            output: OutputKeys::default(),
        };
        program.validate()?;
        Ok(program)
    }

    pub fn with_rules(mut self, rules: PassRules) -> Self {
        self.rules = rules;
        self
    }

    /// Rename the top-level total and status entries of the outcome record
    pub fn with_output(mut self, output: OutputKeys) -> Result<Self, ProgramError> {
        self.output = output;
        self.validate()?;
        Ok(self)
    }

    /// Look up a built-in program by id
    pub fn builtin(id: &str) -> Result<Self, ProgramError> {
        match id {
            AE_PROJECT_WORK => Ok(builtin::ae_project_work()),
            AE_FLAT_PROJECT_WORK => Ok(builtin::ae_flat_project_work()),
            AE_NESTED_PROJECT_WORK => Ok(builtin::ae_nested_project_work()),
            ML => Ok(builtin::ml()),
            other => Err(ProgramError::UnknownProgram(other.to_string())),
        }
    }

    /// Parse and validate a program definition. JSON is accepted as well.
    pub fn from_yaml_str(content: &str) -> Result<Self, ProgramError> {
        let program: ExamProgram = serde_yaml::from_str(content)?;
        program.validate()?;
        Ok(program)
    }

    /// Check the program invariants: non-empty groups, unique keys and
    /// aliases per level, no reserved keys, weights in (0, 1] exactly where
    /// a weight table needs them.
    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.components.is_empty() {
            return Err(ProgramError::EmptyProgram(self.id.clone()));
        }
        self.output.validate()?;
        let mut reserved: Vec<&str> = META_FIELDS.to_vec();
        reserved.extend([
            PROGRAM_KEY,
            self.output.overall.as_str(),
            self.output.status.as_str(),
        ]);
        validate_level(&self.components, &reserved)
    }

    /// Flattened `(path, weight)` entries of the top-level weight table, in
    /// summation order. Subgroups appear as one entry.
    pub fn weight_table(&self) -> Vec<(String, f64)> {
        let mut table = Vec::new();
        collect_weights(&self.components, "", &mut table);
        table
    }
}

fn validate_level(components: &[ComponentSpec], reserved: &[&str]) -> Result<(), ProgramError> {
    let mut seen = HashSet::new();
    for spec in components {
        validate_names(spec, reserved, &mut seen)?;
        validate_component(spec)?;
    }
    Ok(())
}

fn validate_names<'a>(
    spec: &'a ComponentSpec,
    reserved: &[&str],
    seen: &mut HashSet<&'a str>,
) -> Result<(), ProgramError> {
    for name in std::iter::once(&spec.key).chain(&spec.aliases) {
        if reserved.contains(&name.as_str()) {
            return Err(ProgramError::ReservedKey(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(ProgramError::DuplicateKey(name.clone()));
        }
    }
    Ok(())
}

fn validate_component(spec: &ComponentSpec) -> Result<(), ProgramError> {
    match &spec.kind {
        ComponentKind::Section {
            components,
            report_overall,
        } => {
            if spec.weight.is_some() {
                return Err(ProgramError::UnexpectedWeight(spec.key.clone()));
            }
            if components.is_empty() {
                return Err(ProgramError::EmptyGroup(spec.key.clone()));
            }
            let reserved: &[&str] = if *report_overall { &[OVERALL_KEY] } else { &[] };
            validate_level(components, reserved)
        }
        ComponentKind::Subgroup { components } => {
            validate_weight(spec)?;
            if components.is_empty() {
                return Err(ProgramError::EmptyGroup(spec.key.clone()));
            }
            validate_level(components, &[OVERALL_KEY])
        }
        ComponentKind::Score | ComponentKind::Composite => validate_weight(spec),
    }
}

fn validate_weight(spec: &ComponentSpec) -> Result<(), ProgramError> {
    match spec.weight {
        None => Err(ProgramError::MissingWeight(spec.key.clone())),
        Some(weight) if weight.is_finite() && weight > 0.0 && weight <= 1.0 => Ok(()),
        Some(weight) => Err(ProgramError::InvalidWeight {
            key: spec.key.clone(),
            weight,
        }),
    }
}

fn collect_weights(components: &[ComponentSpec], prefix: &str, table: &mut Vec<(String, f64)>) {
    for spec in components {
        let path = if prefix.is_empty() {
            spec.key.clone()
        } else {
            format!("{}.{}", prefix, spec.key)
        };
        match &spec.kind {
            ComponentKind::Section { components, .. } => {
                collect_weights(components, &path, table)
            }
            _ => table.push((path, spec.weight.unwrap_or_default())),
        }
    }
}
