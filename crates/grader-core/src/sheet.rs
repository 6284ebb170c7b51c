//! Reading submitted records against an exam program
//!
//! A record is a JSON object whose keys follow the program tree. Reading it
//! checks field names, nesting and point ranges once, at the boundary, and
//! produces a `ScoreSheet` aligned index-by-index with the program's
//! components.

use crate::error::InputError;
use crate::program::{ComponentKind, ComponentSpec, ExamProgram, META_FIELDS};
use crate::types::{CompositeScore, Points};
use serde_json::{json, Map, Number, Value};

const COMPOSITE_FIELDS: [&str; 2] = ["main", "extra"];

/// Validated input of one component
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentInput {
    Score(Points),
    Composite(CompositeScore),
    /// Inputs of a section or subgroup, aligned with its children
    Group(Vec<Option<ComponentInput>>),
}

/// Validated score sheet of one record. `None` entries were not submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSheet {
    pub name: Option<String>,
    pub components: Vec<Option<ComponentInput>>,
}

impl ScoreSheet {
    /// Read a JSON record; it must be an object
    pub fn from_json(program: &ExamProgram, record: &Value) -> Result<Self, InputError> {
        match record {
            Value::Object(object) => Self::from_record(program, object),
            _ => Err(InputError::InvalidType {
                path: "record".to_string(),
                expected: "object",
            }),
        }
    }

    pub fn from_record(
        program: &ExamProgram,
        record: &Map<String, Value>,
    ) -> Result<Self, InputError> {
        let mut name = None;
        for field in ["Name", "name"] {
            match record.get(field) {
                None | Some(Value::Null) => {}
                Some(Value::String(value)) => {
                    if name.is_some() {
                        return Err(InputError::DuplicateField {
                            path: field.to_string(),
                        });
                    }
                    name = Some(value.clone());
                }
                Some(_) => {
                    return Err(InputError::InvalidType {
                        path: field.to_string(),
                        expected: "string",
                    })
                }
            }
        }

        Ok(Self {
            name,
            components: read_level(&program.components, record, "", true)?,
        })
    }

    /// Canonical JSON form: program keys, every component present, `null`
    /// for anything not submitted.
    pub fn to_record(&self, program: &ExamProgram) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(
            "name".to_string(),
            self.name.clone().map(Value::String).unwrap_or(Value::Null),
        );
        write_level(&program.components, &self.components, &mut record);
        record
    }
}

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn read_level(
    specs: &[ComponentSpec],
    object: &Map<String, Value>,
    prefix: &str,
    top_level: bool,
) -> Result<Vec<Option<ComponentInput>>, InputError> {
    let mut inputs: Vec<Option<ComponentInput>> = vec![None; specs.len()];
    let mut given = vec![false; specs.len()];

    for (field, value) in object {
        if top_level && META_FIELDS.contains(&field.as_str()) {
            continue;
        }
        let path = join(prefix, field);
        let index = specs
            .iter()
            .position(|spec| spec.accepts(field))
            .ok_or_else(|| InputError::UnknownField { path: path.clone() })?;
        if given[index] {
            return Err(InputError::DuplicateField { path });
        }
        given[index] = true;
        inputs[index] = read_component(&specs[index], value, &path)?;
    }

    Ok(inputs)
}

fn read_component(
    spec: &ComponentSpec,
    value: &Value,
    path: &str,
) -> Result<Option<ComponentInput>, InputError> {
    if value.is_null() {
        return Ok(None);
    }
    let input = match &spec.kind {
        ComponentKind::Score => ComponentInput::Score(read_points(value, path)?),
        ComponentKind::Composite => ComponentInput::Composite(read_composite(value, path)?),
        ComponentKind::Section { components, .. } | ComponentKind::Subgroup { components } => {
            let object = expect_object(value, path)?;
            ComponentInput::Group(read_level(components, object, path, false)?)
        }
    };
    Ok(Some(input))
}

fn read_composite(value: &Value, path: &str) -> Result<CompositeScore, InputError> {
    let object = expect_object(value, path)?;
    if let Some(field) = object.keys().find(|k| !COMPOSITE_FIELDS.contains(&k.as_str())) {
        return Err(InputError::UnknownField {
            path: join(path, field),
        });
    }
    let part = |field: &str| -> Result<Option<Points>, InputError> {
        match object.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => read_points(value, &join(path, field)).map(Some),
        }
    };
    Ok(CompositeScore::new(part("main")?, part("extra")?))
}

fn read_points(value: &Value, path: &str) -> Result<Points, InputError> {
    let number = match value {
        Value::Number(number) if is_integral(number) => number,
        _ => {
            return Err(InputError::InvalidType {
                path: path.to_string(),
                expected: "integer points",
            })
        }
    };

    number
        .as_i64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| (0.0..=100.0).contains(f))
                .map(|f| f as i64)
        })
        .and_then(|raw| Points::new(raw).ok())
        .ok_or_else(|| InputError::OutOfRange {
            path: path.to_string(),
            value: number.clone(),
        })
}

/// Integers of any width and floats without a fractional part
fn is_integral(number: &Number) -> bool {
    number.is_i64()
        || number.is_u64()
        || number.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, InputError> {
    value.as_object().ok_or_else(|| InputError::InvalidType {
        path: path.to_string(),
        expected: "object",
    })
}

fn write_level(
    specs: &[ComponentSpec],
    inputs: &[Option<ComponentInput>],
    out: &mut Map<String, Value>,
) {
    for (index, spec) in specs.iter().enumerate() {
        let input = inputs.get(index).and_then(Option::as_ref);
        out.insert(spec.key.clone(), input_to_json(spec, input));
    }
}

fn input_to_json(spec: &ComponentSpec, input: Option<&ComponentInput>) -> Value {
    match (&spec.kind, input) {
        (ComponentKind::Score, Some(ComponentInput::Score(points))) => json!(points.value()),
        (ComponentKind::Composite, Some(ComponentInput::Composite(score))) => json!({
            "main": score.main.map(Points::value),
            "extra": score.extra.map(Points::value),
        }),
        (
            ComponentKind::Section { components, .. } | ComponentKind::Subgroup { components },
            Some(ComponentInput::Group(children)),
        ) => {
            let mut object = Map::new();
            write_level(components, children, &mut object);
            Value::Object(object)
        }
        _ => Value::Null,
    }
}
