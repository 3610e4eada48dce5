//! The extension core: event pump, built-in observers, and the "new
//! cycle" entry point.
//!
//! [`CycleExtension`] owns every piece of state the extension keeps
//! between callbacks; the host editor owns the graph and passes it in.
//! All handlers run to completion on the editor's event loop, so no
//! locking is involved anywhere.

use crate::adapter::{ConnectionChange, GenericPortAdapter};
use crate::badge::{badge_for_node, Badge};
use crate::config::ExtensionConfig;
use crate::cycle::{advance_branch, CycleAdvancer, LoopResolver};
use crate::graph::node::{NodeCategory, NodeRole, INCREMENT_WIDGET, LOOP_ID_WIDGET, TO_MEMORY_INPUT};
use crate::graph::{EditorGraph, NodeId, WidgetValue};
use crate::host::{AutoQueueMode, EditorHost};
use crate::observers::{NodeLifecycleEvent, NodeObserver, ObserverContext, ObserverSet};
use crate::state::events::{EditorEvent, EventBridge, EventSource, MessagePopup};
use crate::state::{keys, StateRegistry};
use std::collections::HashMap;

/// When a loop manager advances its identifier on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncrementMode {
    #[default]
    Never,
    /// Advance whenever execution is interrupted.
    OnAnyInterrupt,
    /// Advance only when an interrupt node left a pending message.
    ByInterruptNode,
}

impl IncrementMode {
    pub fn as_str(self) -> &'static str {
        match self {
            IncrementMode::Never => "never",
            IncrementMode::OnAnyInterrupt => "on_any_interrupt",
            IncrementMode::ByInterruptNode => "by_interrupt_node",
        }
    }

    /// Parse a widget/registry value; unknown strings are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "never" => Some(IncrementMode::Never),
            "on_any_interrupt" => Some(IncrementMode::OnAnyInterrupt),
            "by_interrupt_node" => Some(IncrementMode::ByInterruptNode),
            _ => None,
        }
    }
}

/// Everything the extension keeps between editor callbacks.
pub struct CycleExtension {
    config: ExtensionConfig,
    resolver: LoopResolver,
    advancer: CycleAdvancer,
    registry: StateRegistry,
    observers: ObserverSet,
    bridge: EventBridge,
    source: EventSource,
    running_node: Option<NodeId>,
}

impl CycleExtension {
    pub fn new(config: ExtensionConfig) -> Self {
        let resolver = LoopResolver::new(&config);
        let advancer = CycleAdvancer::new(resolver.clone());
        let (bridge, source) = EventBridge::new();

        let mut observers = ObserverSet::new();
        observers.register(ExecutionStateObserver);
        observers.register(GenericPortObserver::default());

        Self {
            config,
            resolver,
            advancer,
            registry: StateRegistry::new(),
            observers,
            bridge,
            source,
            running_node: None,
        }
    }

    /// Handle the host editor's event listeners hold on to.
    pub fn event_source(&self) -> EventSource {
        self.source.clone()
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// Loop id the editor should seed freshly created cycle nodes with.
    pub fn default_loop_id(&self) -> &str {
        &self.config.default_loop_id
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut StateRegistry {
        &mut self.registry
    }

    pub fn resolver(&self) -> &LoopResolver {
        &self.resolver
    }

    /// Register an extra lifecycle observer, after the built-in ones.
    pub fn register_observer(&mut self, observer: impl NodeObserver + 'static) {
        self.observers.register(observer);
    }

    /// The badge a node should currently display.
    pub fn badge_for(&self, graph: &EditorGraph, id: NodeId) -> Option<Badge> {
        badge_for_node(graph, &self.registry, &self.resolver, id)
    }

    /// The "new cycle" user action: advance every loop identifier once.
    pub fn new_cycle(&mut self, graph: &mut EditorGraph, host: &mut dyn EditorHost) {
        self.advancer.advance(graph, host);
    }

    /// Drain and handle all pending inbound events. Called from the
    /// editor's event loop; malformed events are logged and skipped.
    pub fn pump(&mut self, graph: &mut EditorGraph, host: &mut dyn EditorHost) {
        for raw in self.bridge.drain() {
            match EditorEvent::decode(&raw.name, raw.payload) {
                Ok(event) => self.handle_event(graph, host, event),
                Err(err) => tracing::warn!(name = %raw.name, %err, "dropping malformed event"),
            }
        }
    }

    pub fn handle_event(
        &mut self,
        graph: &mut EditorGraph,
        host: &mut dyn EditorHost,
        event: EditorEvent,
    ) {
        match event {
            EditorEvent::MessagePopup(popup) => self.handle_popup(host, popup),
            EditorEvent::ExecutionInterrupted => self.handle_interrupted(graph, host),
            EditorEvent::TimerUpdate(update) => {
                tracing::debug!(loop_id = %update.loop_id, "timer update");
                self.registry
                    .set(keys::loop_timer(&update.loop_id), update.to_string());
            }
            EditorEvent::Executing(node) => self.running_node = node,
            EditorEvent::NodeExecuted { node, payload } => {
                self.notify(graph, host, &NodeLifecycleEvent::Executed { node, payload });
            }
        }
    }

    /// Editor hook: a node was added to the graph.
    pub fn node_created(
        &mut self,
        graph: &mut EditorGraph,
        host: &mut dyn EditorHost,
        node: NodeId,
    ) {
        self.notify(graph, host, &NodeLifecycleEvent::Created { node });
    }

    /// Editor hook: a link on a node was made or removed.
    pub fn connections_changed(
        &mut self,
        graph: &mut EditorGraph,
        host: &mut dyn EditorHost,
        change: ConnectionChange,
    ) {
        self.notify(
            graph,
            host,
            &NodeLifecycleEvent::ConnectionsChanged(change),
        );
    }

    fn notify(
        &mut self,
        graph: &mut EditorGraph,
        host: &mut dyn EditorHost,
        event: &NodeLifecycleEvent,
    ) {
        // Taken out so observers can borrow the rest of the extension.
        let mut observers = std::mem::take(&mut self.observers);
        let mut ctx = ObserverContext {
            graph,
            registry: &mut self.registry,
            host,
        };
        observers.notify(&mut ctx, event);
        self.observers = observers;
    }

    /// An execution-side dialog request. A stopping popup also marks
    /// the running node as the interrupt cause and keeps the message
    /// around for the interrupted-advancement pass.
    fn handle_popup(&mut self, host: &mut dyn EditorHost, popup: MessagePopup) {
        if popup.stop {
            host.show_dialog(&popup.message);
            // Only the marker and pending message are node-scoped; the
            // dialog and auto-queue handling apply regardless.
            if let Some(node) = self.running_node {
                self.registry.mark_interrupted(node);
                self.registry.set(keys::PENDING_MESSAGE, popup.message);
            } else {
                tracing::warn!("stop popup with no running node");
            }
            // "Instant" re-queues right after the halt, which would
            // interrupt again immediately.
            if host.auto_queue_mode() == AutoQueueMode::Instant {
                host.disable_auto_queue();
            }
        } else if let Some(node) = self.running_node {
            self.registry.clear_interrupted(node);
        }
    }

    /// Execution was halted: managers configured to auto-advance fork
    /// their loop identifier, and one aggregated dialog reports every
    /// change.
    fn handle_interrupted(&mut self, graph: &mut EditorGraph, host: &mut dyn EditorHost) {
        let pending = self
            .registry
            .get(keys::PENDING_MESSAGE)
            .is_some_and(|m| !m.is_empty());
        let mut changes = Vec::new();

        let ids: Vec<NodeId> = graph.node_ids().collect();
        for id in ids {
            let Some(node) = graph.node(id) else {
                continue;
            };
            if node.role != NodeRole::ManagerSource {
                continue;
            }
            // Prefer the mode recorded at execution time over the
            // widget, which the user may have edited since.
            let mode = self
                .registry
                .get(&keys::increment_mode(id))
                .or_else(|| node.widget_str(INCREMENT_WIDGET))
                .and_then(IncrementMode::parse)
                .unwrap_or_default();
            let advance = match mode {
                IncrementMode::Never => false,
                IncrementMode::OnAnyInterrupt => true,
                IncrementMode::ByInterruptNode => pending,
            };
            if !advance {
                continue;
            }
            let Some(current) = node.widget_str(LOOP_ID_WIDGET).map(str::to_owned) else {
                continue;
            };
            let next = advance_branch(&current);
            if let Some(widget) = graph.node_mut(id).and_then(|n| n.find_widget_mut(LOOP_ID_WIDGET))
            {
                widget.value = WidgetValue::Str(next.clone());
                host.request_resize(id);
                changes.push(format!("{current} -> {next}"));
            }
        }

        if !changes.is_empty() {
            tracing::info!(count = changes.len(), "loop ids advanced on interrupt");
            host.show_dialog(&format!("Loop id advanced:\n{}", changes.join("\n")));
        }
        self.registry.take(keys::PENDING_MESSAGE);
    }
}

/// Built-in observer: writes execution results into the registry.
struct ExecutionStateObserver;

impl NodeObserver for ExecutionStateObserver {
    fn on_event(&mut self, ctx: &mut ObserverContext<'_>, event: &NodeLifecycleEvent) {
        let NodeLifecycleEvent::Executed { node, payload } = event else {
            return;
        };
        let Some(node) = ctx.graph.node(*node) else {
            return;
        };

        if let (Some(counter), Some(loop_id)) = (payload.counter(), payload.loop_id()) {
            let port = node
                .find_input(TO_MEMORY_INPUT)
                .or_else(|| node.inputs.first());
            if let Some(port) = port {
                let key = keys::loop_state(loop_id, &port.port_type);
                tracing::debug!(%key, counter, "execution state");
                ctx.registry.set(key, format!("Iteration: {counter}"));
            }
        }

        // Managers report their increment mode so the interrupted path
        // can use the value that was in force during the run.
        if node.role == NodeRole::ManagerSource {
            if let Some(mode) = payload.increment() {
                ctx.registry.set(keys::increment_mode(node.id), mode);
            }
        }
    }
}

/// Built-in observer: attaches a [`GenericPortAdapter`] to every
/// interrupt node and feeds it connection changes.
#[derive(Default)]
struct GenericPortObserver {
    adapters: HashMap<NodeId, GenericPortAdapter>,
}

impl NodeObserver for GenericPortObserver {
    fn on_event(&mut self, ctx: &mut ObserverContext<'_>, event: &NodeLifecycleEvent) {
        match event {
            NodeLifecycleEvent::Created { node } => {
                if ctx
                    .graph
                    .node(*node)
                    .is_some_and(|n| n.category == NodeCategory::Interrupt)
                {
                    self.adapters.insert(*node, GenericPortAdapter::new());
                }
            }
            NodeLifecycleEvent::ConnectionsChanged(change) => {
                if let Some(adapter) = self.adapters.get_mut(&change.node) {
                    adapter.on_connections_change(ctx.graph, &*ctx.host, change);
                }
            }
            NodeLifecycleEvent::Executed { .. } => {}
        }
    }
}
