//! The editor graph container.
//!
//! Nodes and links live in index-addressed vectors; removal tombstones
//! the slot so ids stay stable. Every lookup is total — a stale id from
//! an earlier callback resolves to `None`, never a panic, because the
//! host editor may mutate the graph between callbacks.

use crate::graph::id::{LinkId, NodeId};
use crate::graph::node::GraphNode;

/// A directed edge from an output slot of one node to an input slot of
/// another.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: LinkId,
    pub origin: NodeId,
    pub origin_slot: usize,
    pub target: NodeId,
    pub target_slot: usize,
}

#[derive(Debug, Clone)]
struct NodeSlot {
    node: GraphNode,
    /// Whether this node has been deleted (slot is a tombstone).
    deleted: bool,
}

/// The node graph as the extension core sees it.
#[derive(Debug, Clone, Default)]
pub struct EditorGraph {
    nodes: Vec<NodeSlot>,
    links: Vec<Option<Link>>,
}

impl EditorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns its assigned id.
    pub fn add_node(&mut self, mut node: GraphNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.id = id;
        self.nodes.push(NodeSlot {
            node,
            deleted: false,
        });
        id
    }

    /// Look up a node; `None` for stale or deleted ids.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes
            .get(id.index())
            .filter(|slot| !slot.deleted)
            .map(|slot| &slot.node)
    }

    /// Mutable node lookup; `None` for stale or deleted ids.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.nodes
            .get_mut(id.index())
            .filter(|slot| !slot.deleted)
            .map(|slot| &mut slot.node)
    }

    /// Tombstone a node and drop all links touching it.
    pub fn remove_node(&mut self, id: NodeId) {
        let Some(slot) = self.nodes.get_mut(id.index()) else {
            return;
        };
        slot.deleted = true;

        let dropped: Vec<LinkId> = self
            .links
            .iter()
            .flatten()
            .filter(|l| l.origin == id || l.target == id)
            .map(|l| l.id)
            .collect();
        for link_id in dropped {
            self.unlink(link_id);
        }
    }

    /// Look up a link; `None` for stale ids.
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.index()).and_then(|l| l.as_ref())
    }

    /// Connect an output slot to an input slot, replacing any existing
    /// link on the input. Returns `None` if either end is missing.
    pub fn connect(
        &mut self,
        origin: NodeId,
        origin_slot: usize,
        target: NodeId,
        target_slot: usize,
    ) -> Option<LinkId> {
        // Validate both ends before mutating anything.
        if self
            .node(origin)
            .and_then(|n| n.outputs.get(origin_slot))
            .is_none()
            || self
                .node(target)
                .and_then(|n| n.inputs.get(target_slot))
                .is_none()
        {
            tracing::warn!(
                ?origin,
                origin_slot,
                ?target,
                target_slot,
                "connect refused: missing node or slot"
            );
            return None;
        }

        if let Some(existing) = self
            .node(target)
            .and_then(|n| n.inputs.get(target_slot))
            .and_then(|i| i.link)
        {
            self.unlink(existing);
        }

        let id = LinkId(self.links.len() as u32);
        self.links.push(Some(Link {
            id,
            origin,
            origin_slot,
            target,
            target_slot,
        }));

        if let Some(output) = self
            .node_mut(origin)
            .and_then(|n| n.outputs.get_mut(origin_slot))
        {
            output.links.push(id);
        }
        if let Some(input) = self
            .node_mut(target)
            .and_then(|n| n.inputs.get_mut(target_slot))
        {
            input.link = Some(id);
        }
        Some(id)
    }

    /// Remove a link, detaching it from both ports.
    pub fn unlink(&mut self, id: LinkId) {
        let Some(link) = self.links.get_mut(id.index()).and_then(Option::take) else {
            return;
        };
        if let Some(output) = self
            .node_mut(link.origin)
            .and_then(|n| n.outputs.get_mut(link.origin_slot))
        {
            output.links.retain(|l| *l != id);
        }
        if let Some(input) = self
            .node_mut(link.target)
            .and_then(|n| n.inputs.get_mut(link.target_slot))
        {
            if input.link == Some(id) {
                input.link = None;
            }
        }
    }

    /// Live node ids in the graph's natural order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.deleted)
            .map(|(i, _)| NodeId(i as u32))
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| !slot.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
