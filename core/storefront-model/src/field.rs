//! Field schemas.
//!
//! A [`FieldSpec`] describes one editable property of a component type, a
//! [`FieldMap`] the ordered set of them. The JSON form matches what the
//! browser editor consumes: `{"type": "number", "label": "Gap", "min": 0}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single choice of a `select` or `radio` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

impl SelectOption {
    /// An option whose value is a string.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Value::String(value.into()),
        }
    }

    /// An option with an arbitrary JSON value (e.g. booleans for radio toggles).
    pub fn with_value(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Describes one editable property of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldSpec {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Richtext {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Select {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        options: Vec<SelectOption>,
    },
    Radio {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        options: Vec<SelectOption>,
    },
    /// Ordered list of records, each conforming to `item_fields`.
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(rename = "arrayFields")]
        item_fields: FieldMap,
        #[serde(rename = "defaultItemProps", default, skip_serializing_if = "Map::is_empty")]
        default_item: Map<String, Value>,
    },
    Object {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(rename = "objectFields")]
        object_fields: FieldMap,
    },
    /// An embedded composition sub-tree.
    Slot {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        disallow: Vec<String>,
    },
    /// Editor-only field with no schema of its own.
    Custom {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl FieldSpec {
    pub fn text() -> Self {
        Self::Text {
            label: None,
            placeholder: None,
        }
    }

    pub fn textarea() -> Self {
        Self::Textarea { label: None }
    }

    pub fn richtext() -> Self {
        Self::Richtext { label: None }
    }

    pub fn number() -> Self {
        Self::Number {
            label: None,
            min: None,
            max: None,
        }
    }

    /// Shorthand for a bounded number field.
    pub fn number_range(min: f64, max: f64) -> Self {
        Self::Number {
            label: None,
            min: Some(min),
            max: Some(max),
        }
    }

    /// Shorthand for a number field with only a lower bound.
    pub fn number_min(min: f64) -> Self {
        Self::Number {
            label: None,
            min: Some(min),
            max: None,
        }
    }

    /// Select field from `(label, value)` pairs.
    pub fn select(options: &[(&str, &str)]) -> Self {
        Self::Select {
            label: None,
            options: to_options(options),
        }
    }

    /// Radio field from `(label, value)` pairs.
    pub fn radio(options: &[(&str, &str)]) -> Self {
        Self::Radio {
            label: None,
            options: to_options(options),
        }
    }

    /// Radio field with explicit option values.
    pub fn radio_values(options: Vec<SelectOption>) -> Self {
        Self::Radio {
            label: None,
            options,
        }
    }

    pub fn array(item_fields: FieldMap) -> Self {
        Self::Array {
            label: None,
            item_fields,
            default_item: Map::new(),
        }
    }

    pub fn object(object_fields: FieldMap) -> Self {
        Self::Object {
            label: None,
            object_fields,
        }
    }

    pub fn slot() -> Self {
        Self::Slot {
            label: None,
            disallow: Vec::new(),
        }
    }

    pub fn custom() -> Self {
        Self::Custom { label: None }
    }

    /// Sets the display label.
    #[must_use]
    pub fn labeled(mut self, text: &str) -> Self {
        match &mut self {
            Self::Text { label, .. }
            | Self::Textarea { label }
            | Self::Richtext { label }
            | Self::Number { label, .. }
            | Self::Select { label, .. }
            | Self::Radio { label, .. }
            | Self::Array { label, .. }
            | Self::Object { label, .. }
            | Self::Slot { label, .. }
            | Self::Custom { label } => *label = Some(text.to_string()),
        }
        self
    }

    /// Sets the placeholder of a text field; no-op for other kinds.
    #[must_use]
    pub fn placeholder(mut self, text: &str) -> Self {
        if let Self::Text { placeholder, .. } = &mut self {
            *placeholder = Some(text.to_string());
        }
        self
    }

    /// Sets the component types a slot rejects; no-op for other kinds.
    #[must_use]
    pub fn disallowing(mut self, types: &[&str]) -> Self {
        if let Self::Slot { disallow, .. } = &mut self {
            *disallow = types.iter().map(|t| (*t).to_string()).collect();
        }
        self
    }

    /// Sets the record a new array item starts from; no-op for other kinds.
    #[must_use]
    pub fn default_item(mut self, item: Map<String, Value>) -> Self {
        if let Self::Array { default_item, .. } = &mut self {
            *default_item = item;
        }
        self
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Text { label, .. }
            | Self::Textarea { label }
            | Self::Richtext { label }
            | Self::Number { label, .. }
            | Self::Select { label, .. }
            | Self::Radio { label, .. }
            | Self::Array { label, .. }
            | Self::Object { label, .. }
            | Self::Slot { label, .. }
            | Self::Custom { label } => label.as_deref(),
        }
    }

    /// The wire name of this field kind (`"text"`, `"slot"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Textarea { .. } => "textarea",
            Self::Richtext { .. } => "richtext",
            Self::Number { .. } => "number",
            Self::Select { .. } => "select",
            Self::Radio { .. } => "radio",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
            Self::Slot { .. } => "slot",
            Self::Custom { .. } => "custom",
        }
    }

    pub fn is_slot(&self) -> bool {
        matches!(self, Self::Slot { .. })
    }

    /// Component types this slot rejects. Empty for non-slot fields.
    pub fn disallowed(&self) -> &[String] {
        match self {
            Self::Slot { disallow, .. } => disallow,
            _ => &[],
        }
    }

    /// True if `other` only narrows this field: same kind, and for objects
    /// and arrays a key-subset of the nested fields.
    pub fn admits(&self, other: &FieldSpec) -> bool {
        match (self, other) {
            (Self::Object { object_fields: a, .. }, Self::Object { object_fields: b, .. }) => {
                b.is_subset_of(a)
            }
            (Self::Array { item_fields: a, .. }, Self::Array { item_fields: b, .. }) => {
                b.is_subset_of(a)
            }
            _ => self.kind() == other.kind(),
        }
    }
}

fn to_options(options: &[(&str, &str)]) -> Vec<SelectOption> {
    options
        .iter()
        .map(|(label, value)| SelectOption::new(*label, *value))
        .collect()
}

/// Ordered map of prop name to field schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(IndexMap<String, FieldSpec>);

impl FieldMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: &str, spec: FieldSpec) -> Self {
        self.0.insert(name.to_string(), spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: FieldSpec) -> Option<FieldSpec> {
        self.0.insert(name.into(), spec)
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keeps only the named fields, preserving declaration order.
    #[must_use]
    pub fn only(&self, names: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| names.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Names and specs of every slot-typed field.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.iter().filter(|(_, spec)| spec.is_slot())
    }

    /// True if every key of `self` exists in `superset` with an admissible spec.
    pub fn is_subset_of(&self, superset: &FieldMap) -> bool {
        self.iter().all(|(name, spec)| {
            superset
                .get(name)
                .is_some_and(|declared| declared.admits(spec))
        })
    }
}

impl FromIterator<(String, FieldSpec)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, FieldSpec)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, FieldSpec);
    type IntoIter = indexmap::map::IntoIter<String, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
