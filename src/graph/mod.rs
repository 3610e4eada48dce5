//! The core's view of the externally-owned node graph.
//!
//! The host editor owns nodes, ports, links, and widgets; this module
//! models exactly the slice of that graph the cycle extension reads and
//! mutates. All lookups are total — stale ids resolve to `None` because
//! the editor may add or remove nodes between callbacks.

pub mod editor;
pub mod id;
pub mod node;
pub mod port;

pub use editor::{EditorGraph, Link};
pub use id::{LinkId, NodeId};
pub use node::{GraphNode, NodeCategory, NodeRole, Widget, WidgetValue};
pub use port::{InputPort, LinkColor, OutputPort, WILDCARD};
