//! Node lifecycle dispatch.
//!
//! Instead of layering wrapped callbacks on the nodes themselves, the
//! extension funnels lifecycle notifications through an ordered
//! [`ObserverSet`]: every observer sees every event, in registration
//! order, with mutable access to the graph, the registry, and the host.

use crate::adapter::ConnectionChange;
use crate::graph::{EditorGraph, NodeId};
use crate::host::EditorHost;
use crate::state::events::ExecutedPayload;
use crate::state::StateRegistry;

/// A node lifecycle notification from the host editor.
#[derive(Debug, Clone)]
pub enum NodeLifecycleEvent {
    /// A node was added to the graph.
    Created { node: NodeId },
    /// A node finished executing and reported an output payload.
    Executed {
        node: NodeId,
        payload: ExecutedPayload,
    },
    /// A link on a node was made or removed.
    ConnectionsChanged(ConnectionChange),
}

/// Shared mutable state handed to each observer.
pub struct ObserverContext<'a> {
    pub graph: &'a mut EditorGraph,
    pub registry: &'a mut StateRegistry,
    pub host: &'a mut dyn EditorHost,
}

pub trait NodeObserver {
    fn on_event(&mut self, ctx: &mut ObserverContext<'_>, event: &NodeLifecycleEvent);
}

/// Observers in registration order.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn NodeObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: impl NodeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Deliver one event to every observer, in registration order.
    pub fn notify(&mut self, ctx: &mut ObserverContext<'_>, event: &NodeLifecycleEvent) {
        for observer in &mut self.observers {
            observer.on_event(ctx, event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
