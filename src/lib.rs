//! Iterative-cycle support for a node-based dataflow editor.
//!
//! Cycle nodes re-run with an incrementing string identifier (a "loop
//! id") across successive executions. This crate is the editor-side
//! core for that: it resolves which loop any node belongs to, advances
//! every identifier exactly once per "new cycle" action, tracks
//! last-known execution state for badge overlays, and infers types for
//! generic passthrough ports. The host editor owns the graph, draws
//! the badges, and forwards execution events.
//!
//! # Architecture
//!
//! ```text
//! execution events ──► [EventBridge] ──► [CycleExtension] ──► StateRegistry
//!                                              │                   │
//! "new cycle" action ──► [CycleAdvancer] ──────┤                   ▼
//!                              │               └────────► badge_for_node
//!                        [LoopResolver] ◄── editor graph
//! ```
//!
//! # Design
//!
//! - **Tagged roles** — `NodeRole` is resolved once per node; the
//!   identifier walk dispatches on an enum, not on type-name strings.
//! - **Shared key construction** — event handlers and badge queries
//!   build registry keys through `state::keys`, so they cannot drift.
//! - **Stale-safe lookups** — every graph access tolerates removed
//!   nodes by returning `None`; callbacks never panic on stale ids.
//! - **Single-threaded core** — events cross one crossbeam channel;
//!   all handlers run to completion on the editor's event loop.

pub mod adapter;
pub mod badge;
pub mod config;
pub mod cycle;
pub mod error;
pub mod extension;
pub mod graph;
pub mod host;
pub mod observers;
pub mod state;

pub use adapter::{BindState, ConnectionChange, GenericPortAdapter, PortSide};
pub use badge::{badge_for_node, Badge, BadgeColor};
pub use config::ExtensionConfig;
pub use cycle::{CycleAdvancer, IdentifierOrigin, LoopResolver};
pub use error::{LoopVisError, Result};
pub use extension::{CycleExtension, IncrementMode};
pub use graph::{EditorGraph, GraphNode, LinkId, NodeCategory, NodeId, NodeRole};
pub use host::{AutoQueueMode, EditorHost, NullHost, RecordingHost};
pub use observers::{NodeLifecycleEvent, NodeObserver, ObserverContext, ObserverSet};
pub use state::{EditorEvent, EventBridge, EventSource, StateRegistry, TimerMode};
