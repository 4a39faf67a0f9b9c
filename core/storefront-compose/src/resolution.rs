//! Asynchronous data resolution.
//!
//! A [`DataResolver`] fetches external data for one node and returns the
//! props it owns plus the names it locks as read-only. The
//! [`ResolutionTracker`] keeps, per node, the dependency values of the last
//! successful run and a generation counter: every issued run gets a fresh
//! generation, and a completion whose generation is no longer the latest for
//! its node is discarded.

use crate::error::ResolveError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use storefront_model::Props;
use storefront_types::NodeId;
use tracing::{debug, warn};

/// Output of a successful resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolved {
    /// Props the resolver owns. They override stored props on merge.
    pub props: Props,
    /// Prop names locked against manual edits until the next success.
    #[serde(rename = "readOnly")]
    pub read_only: BTreeSet<String>,
}

#[async_trait]
pub trait DataResolver: Send + Sync {
    /// Input props whose change requires a new run. Empty means every
    /// prop that is not read-only.
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    async fn resolve(&self, props: &Props) -> Result<Resolved, ResolveError>;
}

/// Issued resolution for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionTicket {
    pub node: NodeId,
    pub generation: u64,
    inputs: Props,
}

/// What happened to a completed resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The result was current and has been recorded.
    Applied(Resolved),
    /// A newer run for the same node was issued meanwhile.
    Stale,
    /// The resolver failed; props stay as they were.
    Failed,
    /// Dependencies unchanged since the last success; nothing was run.
    UpToDate,
}

#[derive(Debug, Default)]
struct NodeState {
    latest: u64,
    inputs: Option<Props>,
    read_only: BTreeSet<String>,
}

/// Per-node generation and dependency bookkeeping.
#[derive(Debug, Default)]
pub struct ResolutionTracker {
    next_generation: u64,
    nodes: HashMap<NodeId, NodeState>,
}

impl ResolutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `node` has never resolved or one of its inputs changed since
    /// the last success.
    pub fn needs_resolution(&self, node: &NodeId, deps: &[&str], props: &Props) -> bool {
        match self.nodes.get(node).and_then(|s| s.inputs.as_ref()) {
            Some(previous) => *previous != self.inputs(node, deps, props),
            None => true,
        }
    }

    /// Issues a new run for `node`, superseding any run still in flight.
    pub fn begin(&mut self, node: &NodeId, deps: &[&str], props: &Props) -> ResolutionTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        let inputs = self.inputs(node, deps, props);
        self.nodes.entry(node.clone()).or_default().latest = generation;
        ResolutionTicket {
            node: node.clone(),
            generation,
            inputs,
        }
    }

    pub fn is_current(&self, ticket: &ResolutionTicket) -> bool {
        self.nodes
            .get(&ticket.node)
            .is_some_and(|s| s.latest == ticket.generation)
    }

    /// Records the outcome of `ticket`.
    pub fn complete(
        &mut self,
        ticket: ResolutionTicket,
        outcome: Result<Resolved, ResolveError>,
    ) -> Completion {
        if !self.is_current(&ticket) {
            debug!(node_id = %ticket.node, generation = ticket.generation, "Discarding stale resolution");
            return Completion::Stale;
        }
        match outcome {
            Ok(resolved) => {
                let state = self.nodes.entry(ticket.node).or_default();
                state.inputs = Some(ticket.inputs);
                state.read_only = resolved.read_only.clone();
                Completion::Applied(resolved)
            }
            Err(e) => {
                warn!(node_id = %ticket.node, error = %e, "Data resolution failed, keeping previous props");
                Completion::Failed
            }
        }
    }

    pub fn read_only(&self, node: &NodeId) -> BTreeSet<String> {
        self.nodes
            .get(node)
            .map(|s| s.read_only.clone())
            .unwrap_or_default()
    }

    pub fn is_read_only(&self, node: &NodeId, field: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|s| s.read_only.contains(field))
    }

    /// Drops all state of a removed node. In-flight runs become stale.
    pub fn forget(&mut self, node: &NodeId) {
        self.nodes.remove(node);
    }

    fn inputs(&self, node: &NodeId, deps: &[&str], props: &Props) -> Props {
        if deps.is_empty() {
            let locked = self.nodes.get(node).map(|s| &s.read_only);
            props
                .iter()
                .filter(|(k, _)| k.as_str() != "id" && !locked.is_some_and(|l| l.contains(*k)))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        } else {
            deps.iter()
                .map(|d| (d.to_string(), props.get(*d).cloned().unwrap_or(Value::Null)))
                .collect()
        }
    }
}

/// A resolution issued against a session, runnable without borrowing it.
pub struct PendingResolution {
    pub(crate) ticket: ResolutionTicket,
    pub(crate) resolver: Arc<dyn DataResolver>,
    pub(crate) props: Props,
}

/// The finished run of a [`PendingResolution`].
pub struct ResolutionOutcome {
    pub(crate) ticket: ResolutionTicket,
    pub(crate) result: Result<Resolved, ResolveError>,
}

impl PendingResolution {
    pub fn ticket(&self) -> &ResolutionTicket {
        &self.ticket
    }

    pub async fn run(self) -> ResolutionOutcome {
        let result = self.resolver.resolve(&self.props).await;
        ResolutionOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

impl ResolutionOutcome {
    pub fn ticket(&self) -> &ResolutionTicket {
        &self.ticket
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
