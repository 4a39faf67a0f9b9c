//! Composition data model for the storefront.
//!
//! Defines the types shared by storage, the composition engine and the HTTP
//! surface:
//! - [`FieldSpec`] / [`FieldMap`]: declarative description of a component's editable props
//! - [`Document`] / [`ComponentInstance`]: the persisted page tree
//! - [`LayoutContext`] / [`LayoutProps`]: placement of inline components inside containers
//! - [`validate_props`]: conformance check of prop values against a field map
//! - [`merge_props`]: defaults → stored → resolved precedence
//!
//! These types describe *what* a page is. Which component types exist and how
//! they render is decided by the registry in `storefront-compose`.

mod document;
mod error;
mod field;
mod layout;
mod merge;
mod validate;

pub use document::{ComponentInstance, Document, NodeProps, Props, RootData, Slot};
pub use error::{ModelError, ModelResult};
pub use field::{FieldMap, FieldSpec, SelectOption};
pub use layout::{LayoutContext, LayoutProps};
pub use merge::{merge_into, merge_props};
pub use validate::{validate_props, validate_value, SchemaViolation, ViolationKind};
