//! Resolution and render pipeline.
//!
//! Turning a stored document into output takes three steps:
//! 1. [`Pipeline::sanitize`] re-checks slot disallow lists and prop shapes on load
//! 2. [`Pipeline::resolve`] runs every data resolver in the tree concurrently
//! 3. [`Pipeline::render`] walks the tree pre-order, merging
//!    defaults → stored → resolved props for each node and handing container
//!    components a slot renderer that recurses with the container as parent
//!
//! Failures stay local: a resolver error leaves that node's props as stored,
//! a render error or unknown type becomes a placeholder for that node only.

use crate::definition::{RenderContext, SlotRenderer};
use crate::error::ComposeResult;
use crate::markup::{Element, Markup};
use crate::registry::Registry;
use crate::resolution::Resolved;
use crate::tree::{self, ROOT_SLOT};
use futures::future::join_all;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use storefront_model::{merge_props, validate_props, ComponentInstance, Document, Props};
use storefront_types::NodeId;
use tracing::{debug, warn};

/// Render mode switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Editor canvas rendering: drag handles on, links inert.
    pub editing: bool,
}

impl RenderOptions {
    pub fn editing() -> Self {
        Self { editing: true }
    }
}

/// How a node came out of the render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Rendered,
    /// The render function failed; a placeholder was emitted.
    Failed,
    /// No component of this type is registered; a placeholder was emitted.
    Unknown,
}

/// One visited node, in pre-order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNode {
    pub id: NodeId,
    pub component_type: String,
    pub parent_type: Option<String>,
    pub status: NodeStatus,
}

/// Output of a render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub markup: Markup,
    pub trace: Vec<RenderedNode>,
}

impl Rendered {
    /// Ids of the visited nodes in document order.
    pub fn order(&self) -> Vec<&str> {
        self.trace.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn failures(&self) -> usize {
        self.trace
            .iter()
            .filter(|n| n.status != NodeStatus::Rendered)
            .count()
    }
}

/// Successful resolver outputs of one pass, keyed by node.
#[derive(Debug, Clone, Default)]
pub struct Resolutions {
    resolved: HashMap<NodeId, Resolved>,
    failed: Vec<NodeId>,
}

impl Resolutions {
    pub fn get(&self, id: &NodeId) -> Option<&Resolved> {
        self.resolved.get(id)
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Nodes whose resolver failed in this pass.
    pub fn failed(&self) -> &[NodeId] {
        &self.failed
    }
}

pub struct Pipeline {
    registry: Arc<Registry>,
}

impl Pipeline {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Removes nodes sitting in slots that disallow their type. Returns how
    /// many were removed.
    pub fn sanitize(&self, document: &mut Document) -> ComposeResult<usize> {
        let pruned = tree::prune_disallowed(&self.registry, &mut document.content, &[], ROOT_SLOT)?;
        if pruned > 0 {
            warn!(pruned, "Removed disallowed nodes from loaded document");
        }
        tree::walk(&self.registry, &document.content, None, &mut |node, _| {
            let Some(component) = self.registry.get(&node.component_type) else {
                return;
            };
            let violations = validate_props(component.fields(), node.values());
            if let Some(first) = violations.first() {
                warn!(
                    node_id = %node.id(),
                    component = %node.component_type,
                    violations = violations.len(),
                    first = %first,
                    "Stored props do not match schema"
                );
            }
        });
        Ok(pruned)
    }

    /// Runs every resolver in the tree concurrently. Each resolver sees the
    /// node's defaults merged with its stored props.
    pub async fn resolve(&self, document: &Document) -> Resolutions {
        let mut jobs = Vec::new();
        tree::walk(&self.registry, &document.content, None, &mut |node, _| {
            let Some(component) = self.registry.get(&node.component_type) else {
                return;
            };
            if let Some(resolver) = component.resolver() {
                let props = merge_props(component.defaults(), node.values(), None);
                jobs.push((node.id().clone(), resolver, props));
            }
        });
        if jobs.is_empty() {
            return Resolutions::default();
        }

        debug!(count = jobs.len(), "Resolving component data");
        let outcomes = join_all(jobs.into_iter().map(|(id, resolver, props)| async move {
            let result = resolver.resolve(&props).await;
            (id, result)
        }))
        .await;

        let mut resolutions = Resolutions::default();
        for (id, result) in outcomes {
            match result {
                Ok(resolved) => {
                    resolutions.resolved.insert(id, resolved);
                }
                Err(e) => {
                    warn!(node_id = %id, error = %e, "Data resolution failed, rendering stored props");
                    resolutions.failed.push(id);
                }
            }
        }
        resolutions
    }

    /// Renders the document content without resolved data.
    pub fn render(&self, document: &Document, options: RenderOptions) -> Rendered {
        self.render_resolved(document, &Resolutions::default(), options)
    }

    pub fn render_resolved(
        &self,
        document: &Document,
        resolutions: &Resolutions,
        options: RenderOptions,
    ) -> Rendered {
        let walker = Walker {
            registry: &self.registry,
            resolutions,
            options,
            trace: RefCell::new(Vec::new()),
        };
        let markup = walker.render_slot(&document.content, None);
        Rendered {
            markup,
            trace: walker.trace.into_inner(),
        }
    }

    /// Resolves then renders.
    pub async fn run(&self, document: &Document, options: RenderOptions) -> Rendered {
        let resolutions = self.resolve(document).await;
        self.render_resolved(document, &resolutions, options)
    }
}

struct Walker<'a> {
    registry: &'a Registry,
    resolutions: &'a Resolutions,
    options: RenderOptions,
    trace: RefCell<Vec<RenderedNode>>,
}

impl Walker<'_> {
    fn render_slot(&self, children: &[ComponentInstance], parent: Option<&str>) -> Markup {
        children
            .iter()
            .map(|node| self.render_node(node, parent))
            .collect()
    }

    fn record(&self, node: &ComponentInstance, parent: Option<&str>, status: NodeStatus) -> usize {
        let mut trace = self.trace.borrow_mut();
        trace.push(RenderedNode {
            id: node.id().clone(),
            component_type: node.component_type.clone(),
            parent_type: parent.map(str::to_string),
            status,
        });
        trace.len() - 1
    }

    fn render_node(&self, node: &ComponentInstance, parent: Option<&str>) -> Markup {
        let Some(component) = self.registry.get(&node.component_type) else {
            warn!(node_id = %node.id(), component = %node.component_type, "Unknown component type");
            self.record(node, parent, NodeStatus::Unknown);
            return placeholder(node, "Unknown component");
        };

        let resolved = self.resolutions.get(node.id()).map(|r| &r.props);
        let props = merge_props(component.defaults(), node.values(), resolved);
        let slots = NodeSlots { walker: self, node, props: &props };
        let ctx = RenderContext::new(
            self.options.editing,
            node.id(),
            self.registry.child_context(parent),
            &slots,
        );

        let entry = self.record(node, parent, NodeStatus::Rendered);
        match component.render(&props, &ctx) {
            Ok(markup) => markup,
            Err(e) => {
                warn!(node_id = %node.id(), component = %node.component_type, error = %e, "Render failed");
                self.trace.borrow_mut()[entry].status = NodeStatus::Failed;
                placeholder(node, "Unable to render")
            }
        }
    }
}

/// Slot accessor bound to one node.
struct NodeSlots<'w, 'a> {
    walker: &'w Walker<'a>,
    node: &'w ComponentInstance,
    props: &'w Props,
}

impl SlotRenderer for NodeSlots<'_, '_> {
    fn render_slot(&self, field: &str) -> Markup {
        let is_slot = self
            .walker
            .registry
            .get(&self.node.component_type)
            .and_then(|c| c.fields().get(field))
            .is_some_and(|spec| spec.is_slot());
        if !is_slot {
            warn!(component = %self.node.component_type, field, "Render asked for a field that is not a slot");
            return Markup::new();
        }
        let children: Vec<ComponentInstance> = match self.props.get(field) {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(children) => children,
                Err(e) => {
                    warn!(node_id = %self.node.id(), field, error = %e, "Malformed slot");
                    return Markup::new();
                }
            },
        };
        self.walker
            .render_slot(&children, Some(self.node.component_type.as_str()))
    }
}

fn placeholder(node: &ComponentInstance, message: &str) -> Markup {
    Element::new("div")
        .class("puck-placeholder")
        .attr("data-component", node.component_type.clone())
        .attr("data-node-id", node.id().to_string())
        .text(&format!("{message}: {}", node.component_type))
        .build()
}
