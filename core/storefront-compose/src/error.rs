//! Error types for the composition engine.

use storefront_model::{LayoutContext, ModelError, SchemaViolation};
use storefront_storage::StorageError;
use storefront_types::NodeId;
use thiserror::Error;

/// Result type for registry and tree operations.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors raised while building a registry or mutating a page tree.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("unknown component type: {0}")]
    UnknownComponent(String),

    #[error("component already registered: {0}")]
    DuplicateComponent(String),

    #[error("component {component} names undeclared category '{category}'")]
    UnknownCategory { component: String, category: String },

    /// Default props do not satisfy the declared field schema.
    #[error("invalid default props for {component}: {}", first_violation(.violations))]
    InvalidDefaults {
        component: String,
        violations: Vec<SchemaViolation>,
    },

    /// A field resolver produced a field the component never declared.
    #[error("{component} resolves undeclared field '{field}' in {context} context")]
    UndeclaredField {
        component: String,
        field: String,
        context: LayoutContext,
    },

    #[error("{component} has no slot named '{field}'")]
    UnknownSlot { component: String, field: String },

    #[error("{component} is not allowed in slot '{slot}'")]
    Disallowed { component: String, slot: String },

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("index {index} out of bounds for slot of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cannot move {0} into its own subtree")]
    CyclicMove(NodeId),

    #[error("field '{field}' of {node} is read-only")]
    ReadOnlyField { node: NodeId, field: String },

    #[error("{component} has no editable field '{field}'")]
    UnknownField { component: String, field: String },

    #[error("invalid value for '{field}': {}", first_violation(.violations))]
    InvalidValue {
        field: String,
        violations: Vec<SchemaViolation>,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

fn first_violation(violations: &[SchemaViolation]) -> String {
    match violations {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (+{} more)", rest.len()),
    }
}

/// A component failed to render. The pipeline replaces the node with a
/// placeholder and keeps going.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("props do not match component: {0}")]
    Props(#[from] serde_json::Error),

    #[error("{0}")]
    Failed(String),
}

/// A data resolver failed. The node keeps its previous props.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("upstream unavailable: {0}")]
    Upstream(String),

    #[error("props do not match component: {0}")]
    Props(#[from] serde_json::Error),
}
