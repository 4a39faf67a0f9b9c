//! Conformance of prop values to a field schema.
//!
//! The registry runs this once per component type at registration (against
//! the type's default props) and the engine runs it when a document is
//! loaded. Render functions never re-check shapes.

use crate::document::{json_kind, Props};
use crate::field::{FieldMap, FieldSpec};
use serde_json::Value;
use std::fmt;

/// One mismatch between a value and its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolation {
    /// Dotted location of the offending value (`stats[2].label`).
    pub path: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// The prop has no field spec.
    UnknownField,
    /// The value has the wrong JSON type for its field kind.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    /// A number lies outside the field's bounds.
    OutOfRange { value: f64 },
    /// A select/radio value that is not one of the options.
    NotAnOption,
    /// A slot entry that is not a component instance.
    MalformedNode,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::UnknownField => write!(f, "{}: no field declared", self.path),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "{}: expected {expected}, found {found}", self.path)
            }
            ViolationKind::OutOfRange { value } => {
                write!(f, "{}: {value} is out of range", self.path)
            }
            ViolationKind::NotAnOption => write!(f, "{}: not one of the options", self.path),
            ViolationKind::MalformedNode => {
                write!(f, "{}: not a component instance", self.path)
            }
        }
    }
}

/// Validates a prop bag against `fields`. The `id` key is the node identity
/// and is never part of a schema.
pub fn validate_props(fields: &FieldMap, props: &Props) -> Vec<SchemaViolation> {
    let mut out = Vec::new();
    check_record(fields, props, "", &mut out);
    out
}

/// Validates a single value against its field spec. `null` counts as unset.
pub fn validate_value(spec: &FieldSpec, value: &Value, path: &str) -> Vec<SchemaViolation> {
    let mut out = Vec::new();
    check(spec, value, path, &mut out);
    out
}

fn check_record(fields: &FieldMap, record: &Props, prefix: &str, out: &mut Vec<SchemaViolation>) {
    for (key, value) in record {
        if prefix.is_empty() && key == "id" {
            continue;
        }
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match fields.get(key) {
            Some(spec) => check(spec, value, &path, out),
            None => out.push(SchemaViolation {
                path,
                kind: ViolationKind::UnknownField,
            }),
        }
    }
}

fn wrong(path: &str, expected: &'static str, value: &Value, out: &mut Vec<SchemaViolation>) {
    out.push(SchemaViolation {
        path: path.to_string(),
        kind: ViolationKind::WrongType {
            expected,
            found: json_kind(value),
        },
    });
}

fn check(spec: &FieldSpec, value: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    if value.is_null() {
        return;
    }
    match spec {
        FieldSpec::Text { .. } | FieldSpec::Textarea { .. } | FieldSpec::Richtext { .. } => {
            if !value.is_string() {
                wrong(path, "string", value, out);
            }
        }
        FieldSpec::Number { min, max, .. } => match value.as_f64() {
            Some(n) => {
                let below = min.is_some_and(|m| n < m);
                let above = max.is_some_and(|m| n > m);
                if below || above {
                    out.push(SchemaViolation {
                        path: path.to_string(),
                        kind: ViolationKind::OutOfRange { value: n },
                    });
                }
            }
            None => wrong(path, "number", value, out),
        },
        FieldSpec::Select { options, .. } | FieldSpec::Radio { options, .. } => {
            if !options.iter().any(|o| &o.value == value) {
                out.push(SchemaViolation {
                    path: path.to_string(),
                    kind: ViolationKind::NotAnOption,
                });
            }
        }
        FieldSpec::Array { item_fields, .. } => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    match item {
                        Value::Object(record) => check_record(item_fields, record, &item_path, out),
                        other => wrong(&item_path, "object", other, out),
                    }
                }
            }
            other => wrong(path, "array", other, out),
        },
        FieldSpec::Object { object_fields, .. } => match value {
            Value::Object(record) => check_record(object_fields, record, path, out),
            other => wrong(path, "object", other, out),
        },
        FieldSpec::Slot { .. } => match value {
            Value::Array(nodes) => {
                for (i, node) in nodes.iter().enumerate() {
                    if !is_node_shaped(node) {
                        out.push(SchemaViolation {
                            path: format!("{path}[{i}]"),
                            kind: ViolationKind::MalformedNode,
                        });
                    }
                }
            }
            other => wrong(path, "array", other, out),
        },
        FieldSpec::Custom { .. } => {}
    }
}

fn is_node_shaped(value: &Value) -> bool {
    value.get("type").is_some_and(Value::is_string)
        && value
            .get("props")
            .is_some_and(|p| p.get("id").is_some_and(Value::is_string))
}
