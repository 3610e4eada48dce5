//! Loop identifier resolution.
//!
//! Given any node, finds the string identifier of the cycle it belongs
//! to by tracing backward through relay chains to the authoritative
//! source — the node's own widget, a constant-value node, or a loop
//! manager. Resolution is best-effort and pure: a fixed graph snapshot
//! always resolves to the same value, and anything missing along the
//! walk resolves to `None`.

use crate::config::ExtensionConfig;
use crate::graph::node::{LOOP_ID_WIDGET, VALUE_WIDGET};
use crate::graph::{EditorGraph, LinkId, NodeId, NodeRole};
use std::collections::HashSet;

/// Where a node's loop identifier actually lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierOrigin {
    /// No link on the identifier input; the value is the node's own widget.
    LocalWidget,
    /// A constant-value node reached through the identifier input.
    Constant(NodeId),
    /// A loop-manager node reached through the identifier input.
    Manager(NodeId),
    /// Linked to an upstream node that is not an identifier source.
    Upstream(NodeId),
    /// A link, node, or widget was missing, or the relay walk overflowed.
    Unresolved,
}

/// Resolves loop identifiers by walking the editor graph.
#[derive(Debug, Clone)]
pub struct LoopResolver {
    identifier_inputs: Vec<String>,
    max_relay_depth: usize,
}

impl Default for LoopResolver {
    fn default() -> Self {
        Self::new(&ExtensionConfig::default())
    }
}

impl LoopResolver {
    pub fn new(config: &ExtensionConfig) -> Self {
        Self {
            identifier_inputs: config.identifier_inputs.clone(),
            max_relay_depth: config.max_relay_depth,
        }
    }

    /// Identifier widget/input names, in preference order.
    pub fn identifier_inputs(&self) -> &[String] {
        &self.identifier_inputs
    }

    /// Resolve the loop identifier a node belongs to.
    pub fn resolve(&self, graph: &EditorGraph, id: NodeId) -> Option<String> {
        let node = graph.node(id)?;
        match self.trace_identifier_origin(graph, id) {
            IdentifierOrigin::LocalWidget => node
                .identifier_widget(&self.identifier_inputs)
                .and_then(|w| w.value.as_str())
                .map(str::to_owned),
            IdentifierOrigin::Constant(src) => graph
                .node(src)
                .and_then(|n| n.widget_str(VALUE_WIDGET))
                .map(str::to_owned),
            IdentifierOrigin::Manager(src) => graph
                .node(src)
                .and_then(|n| n.widget_str(LOOP_ID_WIDGET))
                .map(str::to_owned),
            IdentifierOrigin::Upstream(_) | IdentifierOrigin::Unresolved => None,
        }
    }

    /// Classify where a node's identifier comes from. This is the
    /// traversal primitive shared with the cycle advancer.
    pub fn trace_identifier_origin(&self, graph: &EditorGraph, id: NodeId) -> IdentifierOrigin {
        let Some(node) = graph.node(id) else {
            return IdentifierOrigin::Unresolved;
        };
        let Some(link_id) = node
            .identifier_input(&self.identifier_inputs)
            .and_then(|input| input.link)
        else {
            return IdentifierOrigin::LocalWidget;
        };
        self.walk_to_source(graph, link_id)
    }

    /// Follow a link backward through relay chains to the first
    /// non-relay origin.
    fn walk_to_source(&self, graph: &EditorGraph, first: LinkId) -> IdentifierOrigin {
        let mut link_id = first;
        let mut visited: HashSet<NodeId> = HashSet::new();

        for _ in 0..self.max_relay_depth {
            let Some(link) = graph.link(link_id) else {
                return IdentifierOrigin::Unresolved;
            };
            let origin_id = link.origin;
            let Some(origin) = graph.node(origin_id) else {
                return IdentifierOrigin::Unresolved;
            };
            match origin.role {
                NodeRole::ConstantSource => return IdentifierOrigin::Constant(origin_id),
                NodeRole::ManagerSource => return IdentifierOrigin::Manager(origin_id),
                NodeRole::Generic => return IdentifierOrigin::Upstream(origin_id),
                NodeRole::Relay => {
                    if !visited.insert(origin_id) {
                        tracing::warn!(?origin_id, "relay cycle while tracing loop identifier");
                        return IdentifierOrigin::Unresolved;
                    }
                    match origin.inputs.first().and_then(|i| i.link) {
                        Some(next) => link_id = next,
                        None => return IdentifierOrigin::Unresolved,
                    }
                }
            }
        }

        tracing::warn!(
            max_depth = self.max_relay_depth,
            "relay chain exceeded depth cap while tracing loop identifier"
        );
        IdentifierOrigin::Unresolved
    }
}
