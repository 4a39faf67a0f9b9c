//! The persisted page tree.
//!
//! One [`Document`] exists per page path. Its `content` is the top-level slot;
//! container components hold further slots inside their props, as JSON arrays
//! of [`ComponentInstance`]. Which props are slots is decided by the owning
//! component's field schema, so the model exposes slot access by field name
//! and leaves tree-wide traversal to the registry-aware engine.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use storefront_types::NodeId;
use tracing::warn;

/// Ordered children of a slot.
pub type Slot = Vec<ComponentInstance>;

/// Free-form prop bag of a component instance or the document root.
pub type Props = Map<String, Value>;

/// A page: root props plus the ordered top-level content.
///
/// Keys the engine does not interpret (e.g. editor zone state) are carried
/// through `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub root: RootData,
    #[serde(default, deserialize_with = "top_level_nodes")]
    pub content: Vec<ComponentInstance>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads the top-level slot node by node. A malformed node is dropped with a
/// warning instead of failing the whole document.
fn top_level_nodes<'de, D>(deserializer: D) -> Result<Vec<ComponentInstance>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            warn!(found = json_kind(&other), "Document content is not an array, ignoring it");
            return Ok(Vec::new());
        }
    };
    let mut nodes = Vec::with_capacity(raw.len());
    for (index, item) in raw.into_iter().enumerate() {
        match serde_json::from_value::<ComponentInstance>(item) {
            Ok(node) => nodes.push(node),
            Err(e) => warn!(index, error = %e, "Dropping malformed top-level node"),
        }
    }
    Ok(nodes)
}

impl Document {
    /// The well-formed empty document (`{"root": {}, "content": []}`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a document from a root prop bag and content.
    pub fn new(root_props: Props, content: Vec<ComponentInstance>) -> Self {
        Self {
            root: RootData {
                props: Some(root_props),
                extra: Map::new(),
            },
            content,
            extra: Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Root props, or an empty bag when the root carries none.
    pub fn root_props(&self) -> Props {
        self.root.props.clone().unwrap_or_default()
    }

    /// Page title from the root props.
    pub fn title(&self) -> Option<&str> {
        self.root
            .props
            .as_ref()
            .and_then(|p| p.get("title"))
            .and_then(Value::as_str)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Root-level data of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A typed component instance (a node of the page tree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    #[serde(rename = "type")]
    pub component_type: String,
    pub props: NodeProps,
}

/// Props of a node: its identity plus its field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeProps {
    #[serde(default = "missing_id")]
    pub id: NodeId,
    #[serde(flatten)]
    pub values: Props,
}

fn missing_id() -> NodeId {
    NodeId::from("")
}

impl ComponentInstance {
    /// Creates an instance with an explicit id.
    pub fn new(component_type: impl Into<String>, id: NodeId, values: Props) -> Self {
        Self {
            component_type: component_type.into(),
            props: NodeProps { id, values },
        }
    }

    /// Creates an instance with a freshly generated id.
    pub fn create(component_type: &str, values: Props) -> Self {
        Self::new(component_type, NodeId::generate(component_type), values)
    }

    pub fn id(&self) -> &NodeId {
        &self.props.id
    }

    pub fn values(&self) -> &Props {
        &self.props.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.props.values.get(name)
    }

    /// Extract a string value using a JSON pointer into the props (e.g. "/layout/padding").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(Value::as_str)
    }

    /// Extract a numeric value using a JSON pointer into the props.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.pointer(pointer).and_then(Value::as_f64)
    }

    fn pointer(&self, pointer: &str) -> Option<&Value> {
        let mut segments = pointer.trim_start_matches('/').splitn(2, '/');
        let head = segments.next()?;
        let value = self.props.values.get(head)?;
        match segments.next() {
            Some(rest) => value.pointer(&format!("/{rest}")),
            None => Some(value),
        }
    }

    /// Reads the children held in slot field `field`. A missing or null
    /// value is an empty slot.
    pub fn slot(&self, field: &str) -> ModelResult<Vec<ComponentInstance>> {
        match self.props.values.get(field) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value @ Value::Array(_)) => serde_json::from_value(value.clone()).map_err(|e| {
                ModelError::MalformedSlot {
                    field: field.to_string(),
                    reason: e.to_string(),
                }
            }),
            Some(other) => Err(ModelError::MalformedSlot {
                field: field.to_string(),
                reason: format!("expected an array, found {}", json_kind(other)),
            }),
        }
    }

    /// Replaces the children held in slot field `field`.
    pub fn set_slot(&mut self, field: &str, children: Vec<ComponentInstance>) -> ModelResult<()> {
        let value = serde_json::to_value(children)?;
        self.props.values.insert(field.to_string(), value);
        Ok(())
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
