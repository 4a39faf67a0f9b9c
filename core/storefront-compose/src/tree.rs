//! Registry-aware traversal and mutation of a page tree.
//!
//! Slot children live inside their parent's props as JSON, and only the
//! registry knows which props are slots. Every walk here asks it. Nodes of
//! unknown type are leaves.

use crate::error::{ComposeError, ComposeResult};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use storefront_model::{ComponentInstance, Slot};
use storefront_types::NodeId;
use tracing::warn;

/// Name of the top-level slot in diagnostics.
pub const ROOT_SLOT: &str = "content";

/// Addresses a slot: the document content, or a slot field of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SlotRef {
    Root,
    Node { parent: NodeId, field: String },
}

impl SlotRef {
    pub fn child(parent: impl Into<NodeId>, field: &str) -> Self {
        Self::Node {
            parent: parent.into(),
            field: field.to_string(),
        }
    }

    pub fn parent(&self) -> Option<&NodeId> {
        match self {
            Self::Root => None,
            Self::Node { parent, .. } => Some(parent),
        }
    }
}

/// Position of a node found by [`find`].
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub node: ComponentInstance,
    pub slot: SlotRef,
    pub index: usize,
    /// Type of the parent, `None` at the top level.
    pub parent_type: Option<String>,
}

/// Reads the slot children of `node`, logging and skipping malformed slots.
pub fn slot_children(registry: &Registry, node: &ComponentInstance) -> Vec<(String, Slot)> {
    registry
        .slot_fields(&node.component_type)
        .into_iter()
        .filter_map(|field| match node.slot(&field) {
            Ok(children) => Some((field, children)),
            Err(e) => {
                warn!(node_id = %node.id(), component = %node.component_type, error = %e, "Skipping malformed slot");
                None
            }
        })
        .collect()
}

/// Pre-order walk calling `visit(node, parent_type)`.
pub fn walk(
    registry: &Registry,
    content: &[ComponentInstance],
    parent: Option<&str>,
    visit: &mut dyn FnMut(&ComponentInstance, Option<&str>),
) {
    for node in content {
        visit(node, parent);
        for (_, children) in slot_children(registry, node) {
            walk(registry, &children, Some(node.component_type.as_str()), visit);
        }
    }
}

/// All node ids in document order.
pub fn ids(registry: &Registry, content: &[ComponentInstance]) -> Vec<NodeId> {
    let mut out = Vec::new();
    walk(registry, content, None, &mut |node, _| out.push(node.id().clone()));
    out
}

pub fn find(registry: &Registry, content: &[ComponentInstance], id: &NodeId) -> Option<Located> {
    find_in(registry, content, id, &SlotRef::Root, None)
}

fn find_in(
    registry: &Registry,
    content: &[ComponentInstance],
    id: &NodeId,
    slot: &SlotRef,
    parent_type: Option<&str>,
) -> Option<Located> {
    if let Some(index) = content.iter().position(|n| n.id() == id) {
        return Some(Located {
            node: content[index].clone(),
            slot: slot.clone(),
            index,
            parent_type: parent_type.map(str::to_string),
        });
    }
    content.iter().find_map(|node| {
        slot_children(registry, node)
            .into_iter()
            .find_map(|(field, children)| {
                let here = SlotRef::child(node.id().clone(), &field);
                find_in(registry, &children, id, &here, Some(node.component_type.as_str()))
            })
    })
}

/// True if `id` is `node` itself or anywhere below it.
pub fn subtree_contains(registry: &Registry, node: &ComponentInstance, id: &NodeId) -> bool {
    node.id() == id || find(registry, std::slice::from_ref(node), id).is_some()
}

/// Applies `f` to the node `id`, writing changed slots back up the path.
/// Returns `Ok(None)` if no such node exists.
pub fn with_node<R>(
    registry: &Registry,
    content: &mut Slot,
    id: &NodeId,
    f: impl FnOnce(&mut ComponentInstance) -> ComposeResult<R>,
) -> ComposeResult<Option<R>> {
    let mut f = Some(f);
    with_node_in(registry, content, id, &mut f)
}

fn with_node_in<R, F>(
    registry: &Registry,
    content: &mut Slot,
    id: &NodeId,
    f: &mut Option<F>,
) -> ComposeResult<Option<R>>
where
    F: FnOnce(&mut ComponentInstance) -> ComposeResult<R>,
{
    for node in content.iter_mut() {
        if node.id() == id {
            return match f.take() {
                Some(f) => f(node).map(Some),
                None => Ok(None),
            };
        }
        for (field, mut children) in slot_children(registry, node) {
            if let Some(r) = with_node_in(registry, &mut children, id, f)? {
                node.set_slot(&field, children)?;
                return Ok(Some(r));
            }
        }
    }
    Ok(None)
}

/// Applies `f` to the children of `slot`, together with that slot's
/// disallow list and display name.
pub fn with_slot<R>(
    registry: &Registry,
    content: &mut Slot,
    slot: &SlotRef,
    f: impl FnOnce(&mut Slot, &[String], &str) -> ComposeResult<R>,
) -> ComposeResult<R> {
    match slot {
        SlotRef::Root => f(content, &[], ROOT_SLOT),
        SlotRef::Node { parent, field } => with_node(registry, content, parent, |node| {
            let spec = registry
                .require(&node.component_type)?
                .fields()
                .get(field)
                .filter(|s| s.is_slot())
                .cloned()
                .ok_or_else(|| ComposeError::UnknownSlot {
                    component: node.component_type.clone(),
                    field: field.clone(),
                })?;
            let mut children = node.slot(field)?;
            let r = f(&mut children, spec.disallowed(), field)?;
            node.set_slot(field, children)?;
            Ok(r)
        })?
        .ok_or_else(|| ComposeError::NodeNotFound(parent.clone())),
    }
}

/// Inserts `node` into `slot` at `index`, enforcing the disallow list.
pub fn insert(
    registry: &Registry,
    content: &mut Slot,
    slot: &SlotRef,
    index: usize,
    node: ComponentInstance,
) -> ComposeResult<()> {
    with_slot(registry, content, slot, |children, disallow, name| {
        if disallow.contains(&node.component_type) {
            return Err(ComposeError::Disallowed {
                component: node.component_type.clone(),
                slot: name.to_string(),
            });
        }
        if index > children.len() {
            return Err(ComposeError::IndexOutOfBounds {
                index,
                len: children.len(),
            });
        }
        children.insert(index, node);
        Ok(())
    })
}

/// Detaches node `id` with its whole subtree.
pub fn take(
    registry: &Registry,
    content: &mut Slot,
    id: &NodeId,
) -> ComposeResult<Option<ComponentInstance>> {
    if let Some(index) = content.iter().position(|n| n.id() == id) {
        return Ok(Some(content.remove(index)));
    }
    for node in content.iter_mut() {
        for (field, mut children) in slot_children(registry, node) {
            if let Some(taken) = take(registry, &mut children, id)? {
                node.set_slot(&field, children)?;
                return Ok(Some(taken));
            }
        }
    }
    Ok(None)
}

/// Drops nodes whose type their slot disallows. Returns how many were pruned.
pub fn prune_disallowed(
    registry: &Registry,
    content: &mut Slot,
    disallow: &[String],
    slot_name: &str,
) -> ComposeResult<usize> {
    let before = content.len();
    content.retain(|node| {
        let allowed = !disallow.contains(&node.component_type);
        if !allowed {
            warn!(node_id = %node.id(), component = %node.component_type, slot = slot_name, "Pruning disallowed node");
        }
        allowed
    });
    let mut pruned = before - content.len();

    for node in content.iter_mut() {
        let Some(component) = registry.get(&node.component_type) else {
            continue;
        };
        let slots: Vec<(String, Vec<String>)> = component
            .fields()
            .slots()
            .map(|(name, spec)| (name.to_string(), spec.disallowed().to_vec()))
            .collect();
        for (field, field_disallow) in slots {
            let Ok(mut children) = node.slot(&field) else {
                continue;
            };
            let n = prune_disallowed(registry, &mut children, &field_disallow, &field)?;
            if n > 0 {
                node.set_slot(&field, children)?;
                pruned += n;
            }
        }
    }
    Ok(pruned)
}

/// Gives every node without a usable id, or with an id seen earlier in
/// document order, a fresh one. Returns how many were reassigned.
pub fn reassign_duplicate_ids(registry: &Registry, content: &mut Slot) -> ComposeResult<usize> {
    let mut seen = HashSet::new();
    reassign_in(registry, content, &mut seen)
}

fn reassign_in(
    registry: &Registry,
    content: &mut Slot,
    seen: &mut HashSet<NodeId>,
) -> ComposeResult<usize> {
    let mut count = 0;
    for node in content.iter_mut() {
        if !node.id().is_valid() || seen.contains(node.id()) {
            let fresh = NodeId::generate(&node.component_type);
            warn!(old_id = %node.id(), new_id = %fresh, "Reassigning duplicate node id");
            node.props.id = fresh;
            count += 1;
        }
        seen.insert(node.id().clone());
        for (field, mut children) in slot_children(registry, node) {
            let n = reassign_in(registry, &mut children, seen)?;
            if n > 0 {
                node.set_slot(&field, children)?;
                count += n;
            }
        }
    }
    Ok(count)
}
