//! Calculation results
//!
//! The outcome mirrors the program tree. It serializes to the outcome
//! record: one entry per component keyed like the input, `overall` for each
//! subgroup's (and reporting section's) own aggregate, and the program's
//! output keys for the weighted total and the status.

use crate::program::{OutputKeys, OVERALL_KEY, PROGRAM_KEY};
use crate::rules::PassStatus;
use crate::types::GradedComponent;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Result of one component of the program tree
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentOutcome {
    pub key: String,
    pub result: OutcomeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeNode {
    Graded(GradedComponent),
    /// `overall` is set for sections that report their own average
    Section {
        parts: Vec<ComponentOutcome>,
        overall: Option<GradedComponent>,
    },
    Subgroup {
        parts: Vec<ComponentOutcome>,
        overall: GradedComponent,
    },
}

impl OutcomeNode {
    /// Graded value of a leaf, or a group's aggregate
    pub fn graded(&self) -> Option<&GradedComponent> {
        match self {
            OutcomeNode::Graded(graded) => Some(graded),
            OutcomeNode::Subgroup { overall, .. } => Some(overall),
            OutcomeNode::Section { overall, .. } => overall.as_ref(),
        }
    }

    fn parts(&self) -> &[ComponentOutcome] {
        match self {
            OutcomeNode::Section { parts, .. } | OutcomeNode::Subgroup { parts, .. } => parts,
            OutcomeNode::Graded(_) => &[],
        }
    }
}

/// Full result of one calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ExamOutcome {
    /// Id of the program the outcome was calculated with
    pub program: String,
    pub name: Option<String>,
    pub components: Vec<ComponentOutcome>,
    pub overall: GradedComponent,
    pub status: PassStatus,
    /// Names of the `overall` and `status` entries in the outcome record
    pub output: OutputKeys,
}

impl ExamOutcome {
    /// Graded result at a key path such as `["AP2", "planning"]`.
    ///
    /// A subgroup path yields its aggregate, as does `[<subgroup>, "overall"]`.
    /// The same holds for sections that report an aggregate.
    pub fn get(&self, path: &[&str]) -> Option<&GradedComponent> {
        let (first, rest) = path.split_first()?;
        let mut node = &self.components.iter().find(|c| c.key == *first)?.result;
        for key in rest {
            if *key == OVERALL_KEY && !matches!(node, OutcomeNode::Graded(_)) {
                return node.graded();
            }
            node = &node.parts().iter().find(|c| c.key == *key)?.result;
        }
        node.graded()
    }

    /// Points at a key path, absent when not submitted or unknown
    pub fn points(&self, path: &[&str]) -> Option<u8> {
        self.get(path)?.points.map(|p| p.value())
    }
}

struct Entries<'a>(&'a [ComponentOutcome]);

impl Entries<'_> {
    fn write<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        for child in self.0 {
            map.serialize_entry(&child.key, &child.result)?;
        }
        Ok(())
    }
}

impl Serialize for OutcomeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutcomeNode::Graded(graded) => graded.serialize(serializer),
            OutcomeNode::Section { parts, overall } => {
                let len = parts.len() + usize::from(overall.is_some());
                let mut map = serializer.serialize_map(Some(len))?;
                Entries(parts).write(&mut map)?;
                if let Some(overall) = overall {
                    map.serialize_entry(OVERALL_KEY, overall)?;
                }
                map.end()
            }
            OutcomeNode::Subgroup { parts, overall } => {
                let mut map = serializer.serialize_map(Some(parts.len() + 1))?;
                Entries(parts).write(&mut map)?;
                map.serialize_entry(OVERALL_KEY, overall)?;
                map.end()
            }
        }
    }
}

impl Serialize for ExamOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(PROGRAM_KEY, &self.program)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        Entries(&self.components).write(&mut map)?;
        map.serialize_entry(&self.output.overall, &self.overall)?;
        map.serialize_entry(&self.output.status, &self.status)?;
        map.end()
    }
}
