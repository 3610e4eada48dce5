//! Node abstraction for the editor graph.
//!
//! A [`GraphNode`] is the core's view of a node the editor owns: ports,
//! widgets, and two pieces of type metadata resolved once at creation —
//! the [`NodeRole`] (how the node behaves as a loop-identifier source)
//! and the [`NodeCategory`] (which editor palette group it belongs to,
//! and with it the cycle-participation capability).

use crate::graph::id::NodeId;
use crate::graph::port::{InputPort, OutputPort};
use serde::{Deserialize, Serialize};

/// Widget holding a loop identifier on cycle nodes.
pub const LOOP_ID_WIDGET: &str = "loop_id";
/// Fallback identifier widget used by file-backed cycle nodes.
pub const FILENAME_WIDGET: &str = "filename";
/// Value widget of a constant-value node.
pub const VALUE_WIDGET: &str = "value";
/// Increment-mode widget of a loop-manager node.
pub const INCREMENT_WIDGET: &str = "increment";
/// Stop toggle of an interrupt node (widget or converted input).
pub const STOP_WIDGET: &str = "stop";
/// Payload input of a cycle-write node; its type keys the state registry.
pub const TO_MEMORY_INPUT: &str = "to_memory";

/// Values the core reads from and writes to node widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl WidgetValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WidgetValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            WidgetValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            WidgetValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WidgetValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// A named, mutable widget value on a node.
#[derive(Debug, Clone)]
pub struct Widget {
    pub name: String,
    pub value: WidgetValue,
}

impl Widget {
    pub fn new(name: impl Into<String>, value: WidgetValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// How a node behaves as a source when tracing loop identifiers.
///
/// Resolved once per node from the editor's type metadata, so the
/// traversal dispatches on a tag instead of matching type names at
/// every hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    /// Authoritative identifier source via its `value` widget.
    ConstantSource,
    /// Authoritative identifier source via its `loop_id` widget.
    ManagerSource,
    /// Identity pass-through; the walk continues behind it.
    Relay,
    /// Anything else — contributes no identifier.
    Generic,
}

/// Editor palette category of a node, carrying the cycle-participation
/// capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Stores a value under the current loop id each iteration.
    CycleWrite,
    /// Recalls a value stored under the current loop id.
    CycleRead,
    /// Reports per-loop generation timing.
    LoopTimer,
    /// Controls a loop timer without reporting (force stop).
    TimerControl,
    /// Conditionally interrupts execution.
    Interrupt,
    /// Utility node with no cycle involvement.
    Utility,
    /// Any node outside the extension's palette.
    Other,
}

impl NodeCategory {
    /// Whether a "new cycle" traversal advances this node's identifier.
    pub fn participates_in_cycles(self) -> bool {
        matches!(
            self,
            NodeCategory::CycleWrite
                | NodeCategory::CycleRead
                | NodeCategory::LoopTimer
                | NodeCategory::TimerControl
        )
    }
}

/// The core's view of a single node in the editor graph.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: NodeId,
    pub title: String,
    pub role: NodeRole,
    pub category: NodeCategory,
    pub inputs: Vec<InputPort>,
    pub outputs: Vec<OutputPort>,
    pub widgets: Vec<Widget>,
}

impl GraphNode {
    /// Create a node with no ports or widgets. The id is assigned when
    /// the node is added to an [`EditorGraph`](crate::graph::EditorGraph).
    pub fn new(title: impl Into<String>, role: NodeRole, category: NodeCategory) -> Self {
        Self {
            id: NodeId::INVALID,
            title: title.into(),
            role,
            category,
            inputs: Vec::new(),
            outputs: Vec::new(),
            widgets: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: InputPort) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_output(mut self, output: OutputPort) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn with_widget(mut self, name: impl Into<String>, value: WidgetValue) -> Self {
        self.widgets.push(Widget::new(name, value));
        self
    }

    pub fn find_input(&self, name: &str) -> Option<&InputPort> {
        self.inputs.iter().find(|i| i.name == name)
    }

    pub fn find_widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    pub fn find_widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.name == name)
    }

    /// String value of a named widget, if present and string-typed.
    pub fn widget_str(&self, name: &str) -> Option<&str> {
        self.find_widget(name).and_then(|w| w.value.as_str())
    }

    /// The identifier-bearing input, by preferred-name order.
    pub fn identifier_input(&self, names: &[String]) -> Option<&InputPort> {
        names.iter().find_map(|n| self.find_input(n))
    }

    /// The identifier-bearing widget, by preferred-name order.
    pub fn identifier_widget(&self, names: &[String]) -> Option<&Widget> {
        names.iter().find_map(|n| self.find_widget(n))
    }

    /// Mutable access to the identifier-bearing widget.
    pub fn identifier_widget_mut(&mut self, names: &[String]) -> Option<&mut Widget> {
        let name = names.iter().find(|n| self.find_widget(n).is_some())?;
        let name = name.clone();
        self.find_widget_mut(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_names() -> Vec<String> {
        vec!["loop_id".to_string(), "filename".to_string()]
    }

    #[test]
    fn test_widget_lookup() {
        let node = GraphNode::new("Memorize", NodeRole::Generic, NodeCategory::CycleWrite)
            .with_widget(LOOP_ID_WIDGET, WidgetValue::Str("ForLoop_1".into()));
        assert_eq!(node.widget_str(LOOP_ID_WIDGET), Some("ForLoop_1"));
        assert!(node.widget_str("missing").is_none());
    }

    #[test]
    fn test_identifier_widget_prefers_loop_id() {
        let node = GraphNode::new("Override", NodeRole::Generic, NodeCategory::CycleWrite)
            .with_widget(FILENAME_WIDGET, WidgetValue::Str("file_1".into()))
            .with_widget(LOOP_ID_WIDGET, WidgetValue::Str("loop_1".into()));
        let widget = node.identifier_widget(&id_names()).unwrap();
        assert_eq!(widget.name, LOOP_ID_WIDGET);
    }

    #[test]
    fn test_identifier_widget_filename_fallback() {
        let mut node = GraphNode::new("Reload", NodeRole::Generic, NodeCategory::CycleRead)
            .with_widget(FILENAME_WIDGET, WidgetValue::Str("file_1".into()));
        assert_eq!(
            node.identifier_widget(&id_names()).unwrap().name,
            FILENAME_WIDGET
        );

        let widget = node.identifier_widget_mut(&id_names()).unwrap();
        widget.value = WidgetValue::Str("file_2".into());
        assert_eq!(node.widget_str(FILENAME_WIDGET), Some("file_2"));
    }

    #[test]
    fn test_category_participation() {
        assert!(NodeCategory::CycleWrite.participates_in_cycles());
        assert!(NodeCategory::CycleRead.participates_in_cycles());
        assert!(NodeCategory::LoopTimer.participates_in_cycles());
        assert!(!NodeCategory::Interrupt.participates_in_cycles());
        assert!(!NodeCategory::Other.participates_in_cycles());
    }
}
