//! Common test utilities: graph builders for cycle scenarios

#![allow(dead_code)] // Test utilities may not all be used in every test file

use loopvis_rs::graph::node::{
    GraphNode, NodeCategory, NodeRole, INCREMENT_WIDGET, LOOP_ID_WIDGET, STOP_WIDGET,
    TO_MEMORY_INPUT, VALUE_WIDGET,
};
use loopvis_rs::graph::port::{InputPort, OutputPort};
use loopvis_rs::graph::WidgetValue;

/// A constant-value node whose `value` widget holds a loop id.
pub fn constant_node(value: &str) -> GraphNode {
    GraphNode::new("Primitive", NodeRole::ConstantSource, NodeCategory::Other)
        .with_output(OutputPort::new(VALUE_WIDGET, "STRING"))
        .with_widget(VALUE_WIDGET, WidgetValue::Str(value.into()))
}

/// A cycle-write node with a `loop_id` input and widget and a typed
/// payload input.
pub fn write_node(loop_id: &str, payload_type: &str) -> GraphNode {
    GraphNode::new("Memorize", NodeRole::Generic, NodeCategory::CycleWrite)
        .with_input(InputPort::new(LOOP_ID_WIDGET, "STRING"))
        .with_input(InputPort::new(TO_MEMORY_INPUT, payload_type))
        .with_widget(LOOP_ID_WIDGET, WidgetValue::Str(loop_id.into()))
}

/// A cycle-read node with a typed payload output.
pub fn read_node(loop_id: &str, payload_type: &str) -> GraphNode {
    GraphNode::new("Recall", NodeRole::Generic, NodeCategory::CycleRead)
        .with_output(OutputPort::new("from_memory", payload_type))
        .with_widget(LOOP_ID_WIDGET, WidgetValue::Str(loop_id.into()))
}

/// An identity passthrough with one input and one output.
pub fn relay_node() -> GraphNode {
    GraphNode::new("Reroute", NodeRole::Relay, NodeCategory::Other)
        .with_input(InputPort::generic("in"))
        .with_output(OutputPort::generic("out"))
}

/// A loop-manager node with an increment-mode widget.
pub fn manager_node(loop_id: &str, increment: &str) -> GraphNode {
    GraphNode::new("LoopManager", NodeRole::ManagerSource, NodeCategory::Utility)
        .with_widget(LOOP_ID_WIDGET, WidgetValue::Str(loop_id.into()))
        .with_widget(INCREMENT_WIDGET, WidgetValue::Str(increment.into()))
}

/// A loop-timer node.
pub fn timer_node(loop_id: &str) -> GraphNode {
    GraphNode::new("LoopTimer", NodeRole::Generic, NodeCategory::LoopTimer)
        .with_widget(LOOP_ID_WIDGET, WidgetValue::Str(loop_id.into()))
}

/// An interrupt node with a generic passthrough pair and a stop toggle.
pub fn interrupt_node(stop: bool) -> GraphNode {
    GraphNode::new("Interrupt", NodeRole::Generic, NodeCategory::Interrupt)
        .with_input(InputPort::generic("any_in"))
        .with_output(OutputPort::generic("any_out"))
        .with_widget(STOP_WIDGET, WidgetValue::Bool(stop))
}
