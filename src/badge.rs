//! Badge queries for node overlays.
//!
//! The read side of the state registry: given a node, reconstruct the
//! registry key the execution events wrote under and return the badge
//! the editor should draw, if any. Key construction goes through
//! [`state::keys`](crate::state::keys) so this path cannot drift from
//! the write path. Drawing itself belongs to the host editor.

use crate::cycle::LoopResolver;
use crate::graph::node::{NodeCategory, STOP_WIDGET, TO_MEMORY_INPUT};
use crate::graph::{EditorGraph, GraphNode, NodeId};
use crate::state::{keys, StateRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Red,
}

/// A status overlay the editor draws above a node's title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub color: BadgeColor,
}

impl Badge {
    fn green(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: BadgeColor::Green,
        }
    }

    fn red(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: BadgeColor::Red,
        }
    }
}

/// The badge a node should currently display. `None` means no overlay;
/// an absent or cleared registry entry is not an error.
pub fn badge_for_node(
    graph: &EditorGraph,
    registry: &StateRegistry,
    resolver: &LoopResolver,
    id: NodeId,
) -> Option<Badge> {
    let node = graph.node(id)?;
    match node.category {
        NodeCategory::CycleWrite => {
            let loop_id = resolver.resolve(graph, id)?;
            let port = node
                .find_input(TO_MEMORY_INPUT)
                .or_else(|| node.inputs.first())?;
            lookup(registry, &keys::loop_state(&loop_id, &port.port_type)).map(Badge::green)
        }
        NodeCategory::CycleRead => {
            let loop_id = resolver.resolve(graph, id)?;
            let port = node.outputs.first()?;
            lookup(registry, &keys::loop_state(&loop_id, &port.port_type)).map(Badge::green)
        }
        NodeCategory::LoopTimer => {
            let loop_id = resolver.resolve(graph, id)?;
            lookup(registry, &keys::loop_timer(&loop_id)).map(Badge::green)
        }
        NodeCategory::Interrupt => interrupt_badge(node, registry, id),
        NodeCategory::TimerControl | NodeCategory::Utility | NodeCategory::Other => None,
    }
}

/// Interrupt nodes show a red badge: the recorded marker, or a warning
/// when the stop toggle is armed. A `stop` widget that has been
/// converted to an input port no longer decides locally, so the marker
/// alone applies then.
fn interrupt_badge(node: &GraphNode, registry: &StateRegistry, id: NodeId) -> Option<Badge> {
    let mut text = registry
        .get(&keys::interrupt_marker(id))
        .filter(|t| !t.is_empty())
        .map(str::to_owned);
    if let Some(stop) = node.find_widget(STOP_WIDGET) {
        if node.find_input(STOP_WIDGET).is_none() {
            text = if stop.value.as_bool() == Some(true) {
                Some("Will interrupt!".to_string())
            } else {
                None
            };
        }
    }
    text.map(Badge::red)
}

fn lookup(registry: &StateRegistry, key: &str) -> Option<String> {
    registry
        .get(key)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}
