//! Delegated side effects into the host editor.
//!
//! The core never draws, lays out, or queues anything itself; it asks
//! the editor through [`EditorHost`]. Implementations must tolerate the
//! node in question having disappeared — every call is best-effort.

use crate::graph::id::NodeId;
use crate::graph::port::LinkColor;

/// Continuous-queuing mode of the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoQueueMode {
    #[default]
    Disabled,
    /// Re-queue when the graph changes.
    Change,
    /// Re-queue immediately after every execution.
    Instant,
}

/// Editor-side operations the extension delegates.
pub trait EditorHost {
    /// Recompute a node's visual size after a widget mutation, so the
    /// canvas reflows the updated label width.
    fn request_resize(&mut self, node: NodeId);

    /// Show a modal dialog with the given message.
    fn show_dialog(&mut self, message: &str);

    /// Current continuous-queuing mode.
    fn auto_queue_mode(&self) -> AutoQueueMode;

    /// Turn continuous queuing off.
    fn disable_auto_queue(&mut self);

    /// Link color for a concrete port type, if the editor maps one.
    fn link_color(&self, port_type: &str) -> Option<LinkColor>;
}

/// Host that ignores every delegated call.
#[derive(Debug, Default)]
pub struct NullHost;

impl EditorHost for NullHost {
    fn request_resize(&mut self, _node: NodeId) {}
    fn show_dialog(&mut self, _message: &str) {}
    fn auto_queue_mode(&self) -> AutoQueueMode {
        AutoQueueMode::Disabled
    }
    fn disable_auto_queue(&mut self) {}
    fn link_color(&self, _port_type: &str) -> Option<LinkColor> {
        None
    }
}

/// Host that records every delegated call, for tests and embedder
/// harnesses.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub resized: Vec<NodeId>,
    pub dialogs: Vec<String>,
    pub auto_queue: AutoQueueMode,
    pub auto_queue_disables: usize,
    pub colors: std::collections::HashMap<String, LinkColor>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_queue(mut self, mode: AutoQueueMode) -> Self {
        self.auto_queue = mode;
        self
    }

    pub fn with_color(mut self, port_type: &str, color: LinkColor) -> Self {
        self.colors.insert(port_type.to_string(), color);
        self
    }
}

impl EditorHost for RecordingHost {
    fn request_resize(&mut self, node: NodeId) {
        self.resized.push(node);
    }

    fn show_dialog(&mut self, message: &str) {
        self.dialogs.push(message.to_string());
    }

    fn auto_queue_mode(&self) -> AutoQueueMode {
        self.auto_queue
    }

    fn disable_auto_queue(&mut self) {
        self.auto_queue = AutoQueueMode::Disabled;
        self.auto_queue_disables += 1;
    }

    fn link_color(&self, port_type: &str) -> Option<LinkColor> {
        self.colors.get(port_type).copied()
    }
}
