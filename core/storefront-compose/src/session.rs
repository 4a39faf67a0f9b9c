//! Editor-side session over one page document.
//!
//! Mirrors the editor's local state: structural edits are synchronous and
//! validated against the registry, data resolution is asynchronous and
//! guarded by the [`ResolutionTracker`], and publishing replaces the stored
//! document for the session's path.

use crate::error::{ComposeError, ComposeResult};
use crate::pipeline::{Pipeline, RenderOptions, Rendered};
use crate::registry::Registry;
use crate::resolution::{
    Completion, PendingResolution, ResolutionOutcome, ResolutionTracker,
};
use crate::tree::{self, Located, SlotRef};
use futures::future::join_all;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use storefront_model::{merge_props, validate_props, validate_value, ComponentInstance, Document, FieldMap};
use storefront_storage::DocumentStore;
use storefront_types::{NodeId, PagePath};
use tracing::{error, info};

pub struct EditSession {
    registry: Arc<Registry>,
    path: PagePath,
    document: Document,
    tracker: ResolutionTracker,
}

impl EditSession {
    /// Opens `document` for editing. Disallowed nodes are pruned and
    /// duplicate or missing ids get fresh ones.
    pub fn open(registry: Arc<Registry>, path: PagePath, mut document: Document) -> ComposeResult<Self> {
        Pipeline::new(Arc::clone(&registry)).sanitize(&mut document)?;
        let reassigned = tree::reassign_duplicate_ids(&registry, &mut document.content)?;
        if reassigned > 0 {
            info!(path = %path, reassigned, "Reassigned duplicate node ids");
        }
        Ok(Self {
            registry,
            path,
            document,
            tracker: ResolutionTracker::new(),
        })
    }

    /// Opens the stored document for `path`, or an empty one.
    pub fn load(registry: Arc<Registry>, store: &dyn DocumentStore, path: PagePath) -> ComposeResult<Self> {
        let document = store.load_or_empty(&path);
        Self::open(registry, path, document)
    }

    pub fn path(&self) -> &PagePath {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn find(&self, id: &NodeId) -> Option<Located> {
        tree::find(&self.registry, &self.document.content, id)
    }

    fn locate(&self, id: &NodeId) -> ComposeResult<Located> {
        self.find(id).ok_or_else(|| ComposeError::NodeNotFound(id.clone()))
    }

    /// Field set the editor shows for node `id` where it currently sits.
    pub fn fields_for(&self, id: &NodeId) -> ComposeResult<FieldMap> {
        let located = self.locate(id)?;
        self.registry.effective_fields(
            &located.node.component_type,
            located.node.values(),
            located.parent_type.as_deref(),
        )
    }

    // ── Structure ────────────────────────────────────────────────

    /// Inserts a new `component_type` instance with default props at
    /// `index` of `slot`. Returns its id.
    pub fn insert(&mut self, component_type: &str, slot: &SlotRef, index: usize) -> ComposeResult<NodeId> {
        let node = self.registry.instantiate(component_type)?;
        let id = node.id().clone();
        tree::insert(&self.registry, &mut self.document.content, slot, index, node)?;
        info!(node_id = %id, component = component_type, "Inserted node");
        Ok(id)
    }

    /// Removes node `id` and its whole subtree.
    pub fn remove(&mut self, id: &NodeId) -> ComposeResult<ComponentInstance> {
        let node = tree::take(&self.registry, &mut self.document.content, id)?
            .ok_or_else(|| ComposeError::NodeNotFound(id.clone()))?;
        for gone in tree::ids(&self.registry, std::slice::from_ref(&node)) {
            self.tracker.forget(&gone);
        }
        info!(node_id = %id, component = %node.component_type, "Removed node");
        Ok(node)
    }

    /// Moves node `id` to `index` of `to`. The index counts positions after
    /// the node has left its old slot. On error the tree is unchanged.
    pub fn move_node(&mut self, id: &NodeId, to: &SlotRef, index: usize) -> ComposeResult<()> {
        let located = self.locate(id)?;
        if let Some(target) = to.parent()
            && tree::subtree_contains(&self.registry, &located.node, target)
        {
            return Err(ComposeError::CyclicMove(id.clone()));
        }

        let node = tree::take(&self.registry, &mut self.document.content, id)?
            .ok_or_else(|| ComposeError::NodeNotFound(id.clone()))?;
        if let Err(e) = tree::insert(&self.registry, &mut self.document.content, to, index, node.clone()) {
            tree::insert(
                &self.registry,
                &mut self.document.content,
                &located.slot,
                located.index,
                node,
            )?;
            return Err(e);
        }
        Ok(())
    }

    // ── Fields ───────────────────────────────────────────────────

    /// Sets `field` of node `id`. The field must be editable where the node
    /// sits, not locked by a resolver, and `value` must fit its schema.
    pub fn edit_field(&mut self, id: &NodeId, field: &str, value: Value) -> ComposeResult<()> {
        let located = self.locate(id)?;
        let component = located.node.component_type.clone();
        let fields = self.fields_for(id)?;
        let spec = fields
            .get(field)
            .filter(|s| !s.is_slot())
            .ok_or_else(|| ComposeError::UnknownField {
                component: component.clone(),
                field: field.to_string(),
            })?;
        if self.tracker.is_read_only(id, field) {
            return Err(ComposeError::ReadOnlyField {
                node: id.clone(),
                field: field.to_string(),
            });
        }
        let violations = validate_value(spec, &value, field);
        if !violations.is_empty() {
            return Err(ComposeError::InvalidValue {
                field: field.to_string(),
                violations,
            });
        }

        tree::with_node(&self.registry, &mut self.document.content, id, |node| {
            node.props.values.insert(field.to_string(), value);
            Ok(())
        })?;
        Ok(())
    }

    /// Sets a root prop (page title or a site-wide override).
    pub fn edit_root_field(&mut self, field: &str, value: Value) -> ComposeResult<()> {
        let root = self.registry.root();
        let spec = root.fields.get(field).ok_or_else(|| ComposeError::UnknownField {
            component: "root".to_string(),
            field: field.to_string(),
        })?;
        let violations = validate_value(spec, &value, field);
        if !violations.is_empty() {
            return Err(ComposeError::InvalidValue {
                field: field.to_string(),
                violations,
            });
        }
        self.document
            .root
            .props
            .get_or_insert_with(Default::default)
            .insert(field.to_string(), value);
        Ok(())
    }

    /// Root props that do not fit the root schema.
    pub fn root_violations(&self) -> Vec<storefront_model::SchemaViolation> {
        validate_props(&self.registry.root().fields, &self.document.root_props())
    }

    pub fn read_only(&self, id: &NodeId) -> BTreeSet<String> {
        self.tracker.read_only(id)
    }

    // ── Data resolution ──────────────────────────────────────────

    /// True if node `id` has a resolver whose inputs changed since its last
    /// successful run.
    pub fn needs_resolution(&self, id: &NodeId) -> ComposeResult<bool> {
        let located = self.locate(id)?;
        let component = self.registry.require(&located.node.component_type)?;
        let Some(resolver) = component.resolver() else {
            return Ok(false);
        };
        let props = merge_props(component.defaults(), located.node.values(), None);
        Ok(self.tracker.needs_resolution(id, resolver.dependencies(), &props))
    }

    /// Issues a resolution for node `id`, superseding any still in flight.
    /// `None` if the component has no resolver.
    pub fn begin_resolution(&mut self, id: &NodeId) -> ComposeResult<Option<PendingResolution>> {
        let located = self.locate(id)?;
        let component = self.registry.require(&located.node.component_type)?;
        let Some(resolver) = component.resolver() else {
            return Ok(None);
        };
        let props = merge_props(component.defaults(), located.node.values(), None);
        let ticket = self.tracker.begin(id, resolver.dependencies(), &props);
        Ok(Some(PendingResolution {
            ticket,
            resolver,
            props,
        }))
    }

    /// Applies a finished resolution unless a newer one was issued.
    pub fn finish_resolution(&mut self, outcome: ResolutionOutcome) -> ComposeResult<Completion> {
        let node = outcome.ticket.node.clone();
        let completion = self.tracker.complete(outcome.ticket, outcome.result);
        if let Completion::Applied(resolved) = &completion {
            let applied = tree::with_node(&self.registry, &mut self.document.content, &node, |n| {
                for (key, value) in &resolved.props {
                    if key != "id" {
                        n.props.values.insert(key.clone(), value.clone());
                    }
                }
                Ok(())
            })?;
            if applied.is_none() {
                self.tracker.forget(&node);
                return Ok(Completion::Stale);
            }
        }
        Ok(completion)
    }

    /// Resolves node `id` if its inputs changed.
    pub async fn resolve(&mut self, id: &NodeId) -> ComposeResult<Completion> {
        if !self.needs_resolution(id)? {
            return Ok(Completion::UpToDate);
        }
        match self.begin_resolution(id)? {
            Some(pending) => {
                let outcome = pending.run().await;
                self.finish_resolution(outcome)
            }
            None => Ok(Completion::UpToDate),
        }
    }

    /// Resolves every node whose inputs changed, concurrently.
    pub async fn resolve_all(&mut self) -> ComposeResult<Vec<(NodeId, Completion)>> {
        let mut pending = Vec::new();
        for id in tree::ids(&self.registry, &self.document.content) {
            if self.needs_resolution(&id)?
                && let Some(p) = self.begin_resolution(&id)?
            {
                pending.push(p);
            }
        }
        let outcomes = join_all(pending.into_iter().map(PendingResolution::run)).await;
        outcomes
            .into_iter()
            .map(|outcome| {
                let id = outcome.ticket.node.clone();
                self.finish_resolution(outcome).map(|c| (id, c))
            })
            .collect()
    }

    // ── Output ───────────────────────────────────────────────────

    /// Renders the editor canvas.
    pub fn render(&self) -> Rendered {
        Pipeline::new(Arc::clone(&self.registry)).render(&self.document, RenderOptions::editing())
    }

    /// Replaces the stored document for this session's path.
    pub fn publish(&self, store: &dyn DocumentStore) -> ComposeResult<()> {
        match store.save(&self.path, &self.document) {
            Ok(()) => {
                info!(path = %self.path, nodes = self.document.content.len(), "Published page");
                Ok(())
            }
            Err(e) => {
                error!(path = %self.path, error = %e, "Publish failed");
                Err(e.into())
            }
        }
    }
}
