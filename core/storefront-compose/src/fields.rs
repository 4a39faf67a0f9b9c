//! Effective field resolution.
//!
//! The field set the editor shows, and edits are checked against, depends on
//! where a node sits. The parent type picks a [`LayoutContext`]; the
//! component maps that context (and its current props) to a field set.

use crate::definition::FieldContext;
use crate::error::ComposeResult;
use crate::registry::Registry;
use storefront_model::{merge_props, FieldMap, Props};
use tracing::warn;

impl Registry {
    /// Fields of `component_type` for a node with `props` under `parent`.
    ///
    /// Unknown parents resolve as standalone. Fields outside the declared
    /// schema are dropped, so the result is always a subset of it.
    pub fn effective_fields(
        &self,
        component_type: &str,
        props: &Props,
        parent: Option<&str>,
    ) -> ComposeResult<FieldMap> {
        let component = self.require(component_type)?;
        let ctx = FieldContext {
            parent,
            layout: self.child_context(parent),
        };
        let merged = merge_props(component.defaults(), props, None);
        let resolved = component.resolve_fields(&merged, &ctx);

        let declared = component.fields();
        Ok(resolved
            .into_iter()
            .filter(|(name, spec)| {
                let admitted = declared.get(name).is_some_and(|d| d.admits(spec));
                if !admitted {
                    warn!(component = component_type, field = %name, "Dropping undeclared resolved field");
                }
                admitted
            })
            .collect())
    }
}
