//! The "new cycle" traversal.
//!
//! Walks every cycle-participating node and advances each distinct
//! identifier source exactly once, no matter how many nodes share it.
//! The dedup set is keyed by the definitive source node id, so results
//! do not depend on traversal order.

use crate::cycle::resolver::{IdentifierOrigin, LoopResolver};
use crate::cycle::suffix::advance_counter;
use crate::graph::node::{GraphNode, VALUE_WIDGET};
use crate::graph::{EditorGraph, NodeId, WidgetValue};
use crate::host::EditorHost;
use std::collections::HashSet;

/// Decides whether a node takes part in cycle advancement.
pub type ParticipantPredicate = Box<dyn Fn(&GraphNode) -> bool + Send>;

/// Advances loop identifiers across the whole graph on a "new cycle"
/// user action.
pub struct CycleAdvancer {
    resolver: LoopResolver,
    participant: ParticipantPredicate,
}

impl CycleAdvancer {
    /// Advancer with the default participation rule: the node's
    /// category claims the cycle capability.
    pub fn new(resolver: LoopResolver) -> Self {
        Self {
            resolver,
            participant: Box::new(|node| node.category.participates_in_cycles()),
        }
    }

    /// Replace the participation predicate.
    pub fn with_participant(
        mut self,
        participant: impl Fn(&GraphNode) -> bool + Send + 'static,
    ) -> Self {
        self.participant = Box::new(participant);
        self
    }

    /// Advance every distinct identifier source once, writing the new
    /// values into the graph and asking the host to reflow each mutated
    /// node.
    pub fn advance(&self, graph: &mut EditorGraph, host: &mut dyn EditorHost) {
        let mut already_incremented: HashSet<NodeId> = HashSet::new();
        let mut advanced = 0usize;
        let ids: Vec<NodeId> = graph.node_ids().collect();

        for id in ids {
            let Some(node) = graph.node(id) else {
                continue;
            };
            if !(self.participant)(node) {
                continue;
            }

            // Where does this node's identifier come from?
            let mut new_value: Option<String> = None;
            match self.resolver.trace_identifier_origin(graph, id) {
                IdentifierOrigin::Constant(src) => {
                    let Some(current) = graph
                        .node(src)
                        .and_then(|n| n.widget_str(VALUE_WIDGET))
                        .map(str::to_owned)
                    else {
                        continue;
                    };
                    // First reference advances the constant; later ones
                    // mirror the already-advanced value as-is.
                    if already_incremented.insert(src) {
                        let next = advance_counter(&current);
                        if let Some(widget) = graph
                            .node_mut(src)
                            .and_then(|n| n.find_widget_mut(VALUE_WIDGET))
                        {
                            widget.value = WidgetValue::Str(next.clone());
                            advanced += 1;
                            host.request_resize(src);
                        }
                        new_value = Some(next);
                    } else {
                        new_value = Some(current);
                    }
                }
                // The identifier flows from upstream; whoever owns the
                // source updates it (or nobody does — preserved as-is).
                IdentifierOrigin::Manager(_) | IdentifierOrigin::Upstream(_) => continue,
                IdentifierOrigin::LocalWidget | IdentifierOrigin::Unresolved => {}
            }

            if already_incremented.contains(&id) {
                continue;
            }

            // Sync the node's own identifier widget: either mirror the
            // freshly advanced constant, or advance the widget directly.
            let names = self.resolver.identifier_inputs().to_vec();
            let Some(current) = graph
                .node(id)
                .and_then(|n| n.identifier_widget(&names))
                .and_then(|w| w.value.as_str())
                .map(str::to_owned)
            else {
                continue;
            };
            let value = new_value.unwrap_or_else(|| advance_counter(&current));
            if value == current {
                continue;
            }
            if let Some(widget) = graph.node_mut(id).and_then(|n| n.identifier_widget_mut(&names)) {
                widget.value = WidgetValue::Str(value);
                already_incremented.insert(id);
                advanced += 1;
                host.request_resize(id);
            }
        }

        tracing::info!(advanced, "new cycle: loop identifiers advanced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::{NodeCategory, NodeRole, LOOP_ID_WIDGET};
    use crate::graph::port::{InputPort, OutputPort};
    use crate::host::RecordingHost;

    fn constant(value: &str) -> GraphNode {
        GraphNode::new("Primitive", NodeRole::ConstantSource, NodeCategory::Other)
            .with_output(OutputPort::new(VALUE_WIDGET, "STRING"))
            .with_widget(VALUE_WIDGET, WidgetValue::Str(value.into()))
    }

    fn write_node(loop_id: &str) -> GraphNode {
        GraphNode::new("Memorize", NodeRole::Generic, NodeCategory::CycleWrite)
            .with_input(InputPort::new(LOOP_ID_WIDGET, "STRING"))
            .with_widget(LOOP_ID_WIDGET, WidgetValue::Str(loop_id.into()))
    }

    fn advancer() -> CycleAdvancer {
        CycleAdvancer::new(LoopResolver::default())
    }

    #[test]
    fn test_unconnected_widget_advances() {
        let mut graph = EditorGraph::new();
        let node = graph.add_node(write_node("ForLoop_1"));
        let mut host = RecordingHost::new();

        advancer().advance(&mut graph, &mut host);
        assert_eq!(
            graph.node(node).unwrap().widget_str(LOOP_ID_WIDGET),
            Some("ForLoop_2")
        );
        assert_eq!(host.resized, vec![node]);
    }

    #[test]
    fn test_constant_fanout_increments_once() {
        let mut graph = EditorGraph::new();
        let src = graph.add_node(constant("run_3"));
        let nodes: Vec<NodeId> = (0..4)
            .map(|_| {
                let id = graph.add_node(write_node("stale"));
                graph.connect(src, 0, id, 0).unwrap();
                id
            })
            .collect();
        let mut host = RecordingHost::new();

        advancer().advance(&mut graph, &mut host);

        assert_eq!(graph.node(src).unwrap().widget_str(VALUE_WIDGET), Some("run_4"));
        // All dependents mirror the single post-increment value.
        for id in nodes {
            assert_eq!(
                graph.node(id).unwrap().widget_str(LOOP_ID_WIDGET),
                Some("run_4")
            );
        }
    }

    #[test]
    fn test_upstream_connection_is_skipped() {
        let mut graph = EditorGraph::new();
        let other = graph.add_node(
            GraphNode::new("TextConcat", NodeRole::Generic, NodeCategory::Other)
                .with_output(OutputPort::new("text", "STRING")),
        );
        let node = graph.add_node(write_node("kept_1"));
        graph.connect(other, 0, node, 0).unwrap();
        let mut host = RecordingHost::new();

        advancer().advance(&mut graph, &mut host);

        // Documented behavior: nothing upstream advances the id either.
        assert_eq!(
            graph.node(node).unwrap().widget_str(LOOP_ID_WIDGET),
            Some("kept_1")
        );
        assert!(host.resized.is_empty());
    }

    #[test]
    fn test_non_participants_are_ignored() {
        let mut graph = EditorGraph::new();
        let node = graph.add_node(
            GraphNode::new("Note", NodeRole::Generic, NodeCategory::Other)
                .with_widget(LOOP_ID_WIDGET, WidgetValue::Str("note_1".into())),
        );
        let mut host = RecordingHost::new();

        advancer().advance(&mut graph, &mut host);
        assert_eq!(
            graph.node(node).unwrap().widget_str(LOOP_ID_WIDGET),
            Some("note_1")
        );
    }

    #[test]
    fn test_custom_participant_predicate() {
        let mut graph = EditorGraph::new();
        let node = graph.add_node(
            GraphNode::new("Note", NodeRole::Generic, NodeCategory::Other)
                .with_widget(LOOP_ID_WIDGET, WidgetValue::Str("note_1".into())),
        );
        let mut host = RecordingHost::new();

        let advancer = advancer().with_participant(|n| n.title == "Note");
        advancer.advance(&mut graph, &mut host);
        assert_eq!(
            graph.node(node).unwrap().widget_str(LOOP_ID_WIDGET),
            Some("note_2")
        );
    }
}
