//! The shared execution-state registry.
//!
//! A flat map of composite string keys to display strings. Event
//! handlers write into it as execution reports arrive; badge rendering
//! reads from it on every draw. Keys are namespaced by the helpers in
//! [`keys`], so writers and readers never concatenate by hand.

use std::collections::HashMap;

use crate::graph::NodeId;

/// Key builders for the registry's composite string keys.
pub mod keys {
    use crate::graph::NodeId;

    /// Registry slot holding the message of a popup that has not yet
    /// been attributed to an interrupt.
    pub const PENDING_MESSAGE: &str = "PendingMessage";

    /// Per-loop stored-value status, keyed by the payload's port type.
    pub fn loop_state(loop_id: &str, port_type: &str) -> String {
        format!("{loop_id}.{port_type}")
    }

    /// Per-loop timer readout.
    pub fn loop_timer(loop_id: &str) -> String {
        format!("{loop_id}.LoopTimer")
    }

    /// Marker set while an interrupt node is responsible for a halt.
    pub fn interrupt_marker(node: NodeId) -> String {
        format!("InterruptNode{node}")
    }

    /// Per-manager increment-mode override.
    pub fn increment_mode(node: NodeId) -> String {
        format!("IncrementMode{node}")
    }
}

/// Execution state shared between event handlers and badge rendering.
///
/// Owned by the extension and passed by reference to whoever needs it,
/// so tests can build isolated instances.
#[derive(Debug, Clone, Default)]
pub struct StateRegistry {
    entries: HashMap<String, String>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a status string, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Remove and return a value, for consume-once slots.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry. Used when the editor loads a new workflow.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mark a node as the cause of the current interrupt. The stored
    /// string doubles as the badge text.
    pub fn mark_interrupted(&mut self, node: NodeId) {
        self.set(keys::interrupt_marker(node), "Interrupt was here!");
    }

    /// Whether a node is currently marked as the interrupt cause.
    pub fn is_interrupted(&self, node: NodeId) -> bool {
        self.get(&keys::interrupt_marker(node)).is_some()
    }

    pub fn clear_interrupted(&mut self, node: NodeId) {
        self.remove(&keys::interrupt_marker(node));
    }
}
