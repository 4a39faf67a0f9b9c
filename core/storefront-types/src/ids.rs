//! Identifier type for component instances.
//!
//! Stored documents carry ids authored by the editor (`"heading-1"`,
//! `"Card-0199..."`), so a node id is an opaque string rather than a UUID.
//! Freshly inserted nodes get `<Type>-<uuid v7>`, which is unique and sorts
//! by creation time.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of a component instance within a document.
///
/// Assigned once at creation and never reused, so editor selection and drag
/// state survive unrelated re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generates a fresh id for a new instance of `component_type`.
    #[must_use]
    pub fn generate(component_type: &str) -> Self {
        Self(format!("{component_type}-{}", Uuid::now_v7()))
    }

    /// Parses an id, rejecting empty or whitespace-only strings.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s.trim().is_empty() {
            return Err(crate::Error::InvalidNodeId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this id is usable as a node identity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
