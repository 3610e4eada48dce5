//! Type inference for a generic port pair.
//!
//! Some nodes expose a passthrough input/output pair whose type is not
//! known until one side is connected. [`GenericPortAdapter`] watches
//! slot-0 connection changes on such a node and copies the concrete
//! type from whichever side connects first onto the opposite port,
//! resetting back to the wildcard on full disconnect.

use crate::graph::{EditorGraph, LinkId, NodeId, WILDCARD};
use crate::host::EditorHost;

/// Which side of the node a connection change touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSide {
    Input,
    Output,
}

/// Where the pair's concrete type currently comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindState {
    #[default]
    Unbound,
    BoundFromInput,
    BoundFromOutput,
}

/// A slot connection change as reported by the host editor, after the
/// graph has been updated.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionChange {
    pub node: NodeId,
    pub side: PortSide,
    pub slot: usize,
    pub connected: bool,
    /// The link involved, valid at the time of the callback.
    pub link: Option<LinkId>,
}

/// Per-node state machine for a generic slot-0 input/output pair.
#[derive(Debug, Clone, Default)]
pub struct GenericPortAdapter {
    state: BindState,
}

impl GenericPortAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BindState {
        self.state
    }

    /// React to a connection change on the adapted node. Changes on
    /// slots other than 0 are ignored.
    pub fn on_connections_change(
        &mut self,
        graph: &mut EditorGraph,
        host: &dyn EditorHost,
        change: &ConnectionChange,
    ) {
        if change.slot != 0 {
            return;
        }
        let Some(node) = graph.node(change.node) else {
            return;
        };
        let input_linked = node.inputs.first().is_some_and(|i| i.is_connected());
        let output_linked = node.outputs.first().is_some_and(|o| !o.links.is_empty());

        // Only act while the opposite side is free; otherwise the pair
        // is already typed by an earlier connection.
        let other_free = match change.side {
            PortSide::Input => !output_linked,
            PortSide::Output => !input_linked,
        };
        if other_free {
            if !change.connected {
                self.reset(graph, change.node, true, true);
            } else {
                match change.side {
                    PortSide::Input => match self.peer_type_via_input(graph, change) {
                        Some(concrete) => self.bind_output(graph, change.node, &concrete),
                        None => self.reset(graph, change.node, false, true),
                    },
                    PortSide::Output => match self.peer_type_via_output(graph, change) {
                        Some(concrete) => self.bind_input(graph, change.node, &concrete),
                        None => self.reset(graph, change.node, true, false),
                    },
                }
            }
        }

        self.refresh_colors(graph, host, change.node);
    }

    /// Concrete type of the output port feeding the new input link.
    fn peer_type_via_input(&self, graph: &EditorGraph, change: &ConnectionChange) -> Option<String> {
        let link = graph.link(change.link?)?;
        let origin = graph.node(link.origin)?;
        let port_type = &origin.outputs.get(link.origin_slot)?.port_type;
        (port_type != WILDCARD).then(|| port_type.clone())
    }

    /// Concrete type of the input port fed by the new output link.
    fn peer_type_via_output(
        &self,
        graph: &EditorGraph,
        change: &ConnectionChange,
    ) -> Option<String> {
        let link = graph.link(change.link?)?;
        let target = graph.node(link.target)?;
        let port_type = &target.inputs.get(link.target_slot)?.port_type;
        (port_type != WILDCARD).then(|| port_type.clone())
    }

    /// The output takes the concrete type as its display name too.
    fn bind_output(&mut self, graph: &mut EditorGraph, node: NodeId, concrete: &str) {
        if let Some(output) = graph.node_mut(node).and_then(|n| n.outputs.first_mut()) {
            output.port_type = concrete.to_string();
            output.name = concrete.to_string();
        }
        self.state = BindState::BoundFromInput;
    }

    /// The input takes the type only; its name stays.
    fn bind_input(&mut self, graph: &mut EditorGraph, node: NodeId, concrete: &str) {
        if let Some(input) = graph.node_mut(node).and_then(|n| n.inputs.first_mut()) {
            input.port_type = concrete.to_string();
        }
        self.state = BindState::BoundFromOutput;
    }

    fn reset(&mut self, graph: &mut EditorGraph, node: NodeId, input: bool, output: bool) {
        if let Some(node) = graph.node_mut(node) {
            if input {
                if let Some(input) = node.inputs.first_mut() {
                    input.port_type = WILDCARD.to_string();
                }
            }
            if output {
                if let Some(output) = node.outputs.first_mut() {
                    output.port_type = WILDCARD.to_string();
                    output.name = WILDCARD.to_string();
                }
            }
        }
        self.state = BindState::Unbound;
    }

    fn refresh_colors(&self, graph: &mut EditorGraph, host: &dyn EditorHost, node: NodeId) {
        let Some(node) = graph.node_mut(node) else {
            return;
        };
        if let Some(input) = node.inputs.first_mut() {
            input.color = host.link_color(&input.port_type);
        }
        if let Some(output) = node.outputs.first_mut() {
            output.color = host.link_color(&output.port_type);
        }
    }
}
