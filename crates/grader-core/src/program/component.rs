//! Component definitions of an exam program

use serde::{Deserialize, Serialize};

/// One node of an exam program
///
/// ```yaml
/// key: PW
/// aliases: [pw]
/// kind: subgroup
/// weight: 0.5
/// tracked: true
/// components:
///   - { key: project, kind: score, weight: 0.5 }
///   - { key: presentation, kind: score, weight: 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Output key, also accepted as input key
    pub key: String,

    /// Additional accepted input keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Weight in the enclosing weight table. Sections carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Whether the pass/fail rules look at this component
    #[serde(default)]
    pub tracked: bool,

    #[serde(flatten)]
    pub kind: ComponentKind,
}

/// Shape of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    /// A single flat score
    Score,
    /// A main score with an optional extra exam
    Composite,
    /// A namespace only: children are line items of the enclosing level.
    /// With `report_overall` the outcome also shows the weighted average of
    /// the children under `overall`; the enclosing level is unaffected.
    Section {
        components: Vec<ComponentSpec>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        report_overall: bool,
    },
    /// Children are averaged over their own weight table first; the result
    /// is one line item of the enclosing level
    Subgroup { components: Vec<ComponentSpec> },
}

impl ComponentSpec {
    fn new(key: impl Into<String>, weight: Option<f64>, kind: ComponentKind) -> Self {
        Self {
            key: key.into(),
            aliases: Vec::new(),
            weight,
            tracked: false,
            kind,
        }
    }

    pub fn score(key: impl Into<String>, weight: f64) -> Self {
        Self::new(key, Some(weight), ComponentKind::Score)
    }

    pub fn composite(key: impl Into<String>, weight: f64) -> Self {
        Self::new(key, Some(weight), ComponentKind::Composite)
    }

    pub fn section(key: impl Into<String>, components: Vec<ComponentSpec>) -> Self {
        Self::new(
            key,
            None,
            ComponentKind::Section {
                components,
                report_overall: false,
            },
        )
    }

    pub fn subgroup(key: impl Into<String>, weight: f64, components: Vec<ComponentSpec>) -> Self {
        Self::new(key, Some(weight), ComponentKind::Subgroup { components })
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn tracked(mut self) -> Self {
        self.tracked = true;
        self
    }

    /// Report the weighted average of a section's children. No effect on
    /// other kinds.
    pub fn reporting_overall(mut self) -> Self {
        if let ComponentKind::Section { report_overall, .. } = &mut self.kind {
            *report_overall = true;
        }
        self
    }

    /// Whether `name` addresses this component on input
    pub fn accepts(&self, name: &str) -> bool {
        self.key == name || self.aliases.iter().any(|a| a == name)
    }

    /// Child components of a section or subgroup
    pub fn children(&self) -> &[ComponentSpec] {
        match &self.kind {
            ComponentKind::Section { components, .. } | ComponentKind::Subgroup { components } => {
                components
            }
            ComponentKind::Score | ComponentKind::Composite => &[],
        }
    }
}
