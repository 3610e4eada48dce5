//! Inbound execution events.
//!
//! The host editor forwards execution reports as `(name, json)` pairs
//! over a crossbeam channel; [`EditorEvent::decode`] turns them into
//! typed payloads. The core drains the channel from the editor's event
//! loop, so all state mutation stays on one thread.

use crate::error::{LoopVisError, Result};
use crate::graph::NodeId;
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Unit the loop timer reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl TimerMode {
    /// Single-letter unit suffix shown after each duration.
    pub fn unit_letter(self) -> char {
        match self {
            TimerMode::Hours => 'h',
            TimerMode::Minutes | TimerMode::Milliseconds => 'm',
            TimerMode::Seconds => 's',
        }
    }

    /// Decimal places used when formatting a duration.
    pub fn decimals(self) -> usize {
        match self {
            TimerMode::Milliseconds => 0,
            _ => 2,
        }
    }
}

/// `message-popup` payload: an execution-side dialog request.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePopup {
    /// Whether execution is being halted.
    pub stop: bool,
    #[serde(default)]
    pub message: String,
}

/// `timer-update` payload: one loop's timing readout.
#[derive(Debug, Clone, Deserialize)]
pub struct TimerUpdate {
    pub loop_id: String,
    pub mode: TimerMode,
    pub last_time: f64,
    pub total_time: f64,
}

impl fmt::Display for TimerUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.mode.unit_letter();
        let decimals = self.mode.decimals();
        write!(
            f,
            "{:.decimals$}{unit} | {:.decimals$}{unit}",
            self.last_time, self.total_time
        )
    }
}

/// `node-executed` output payload. Every field arrives as a
/// single-element sequence; index 0 is authoritative.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutedPayload {
    #[serde(default)]
    pub counter: Vec<i64>,
    #[serde(default)]
    pub loop_id: Vec<String>,
    #[serde(default)]
    pub memory_content: Vec<Value>,
    #[serde(default)]
    pub increment: Vec<String>,
}

impl ExecutedPayload {
    pub fn counter(&self) -> Option<i64> {
        self.counter.first().copied()
    }

    pub fn loop_id(&self) -> Option<&str> {
        self.loop_id.first().map(String::as_str)
    }

    pub fn increment(&self) -> Option<&str> {
        self.increment.first().map(String::as_str)
    }
}

/// A decoded inbound editor event.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    MessagePopup(MessagePopup),
    ExecutionInterrupted,
    TimerUpdate(TimerUpdate),
    /// The node execution moved to, or `None` when the run finished.
    Executing(Option<NodeId>),
    NodeExecuted {
        node: NodeId,
        payload: ExecutedPayload,
    },
}

impl EditorEvent {
    /// Decode a raw `(name, payload)` event. Unknown names and
    /// malformed payloads are errors; callers log and skip them.
    pub fn decode(name: &str, payload: Value) -> Result<Self> {
        match name {
            "message-popup" => Ok(EditorEvent::MessagePopup(serde_json::from_value(payload)?)),
            "execution-interrupted" => Ok(EditorEvent::ExecutionInterrupted),
            "timer-update" => Ok(EditorEvent::TimerUpdate(serde_json::from_value(payload)?)),
            "executing" => {
                #[derive(Deserialize)]
                struct Executing {
                    node: Option<NodeId>,
                }
                let Executing { node } = serde_json::from_value(payload)?;
                Ok(EditorEvent::Executing(node))
            }
            "node-executed" => {
                #[derive(Deserialize)]
                struct Executed {
                    node: NodeId,
                    #[serde(default)]
                    payload: ExecutedPayload,
                }
                let Executed { node, payload } = serde_json::from_value(payload)?;
                Ok(EditorEvent::NodeExecuted { node, payload })
            }
            other => Err(LoopVisError::Event(format!("unknown event: {other}"))),
        }
    }
}

/// A raw event as forwarded by the host editor.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub name: String,
    pub payload: Value,
}

/// Capacity for events (editor → core). Events are tiny; a run emits a
/// handful per node.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Core-side handle for receiving events from the host editor.
pub struct EventBridge {
    event_rx: Receiver<RawEvent>,
}

/// Editor-side handle for forwarding events into the core.
#[derive(Clone)]
pub struct EventSource {
    event_tx: Sender<RawEvent>,
}

impl EventBridge {
    /// Create a bridge pair: the core keeps the bridge, the editor's
    /// event listeners keep the source.
    pub fn new() -> (Self, EventSource) {
        let (event_tx, event_rx) = bounded(EVENT_CHANNEL_CAPACITY);
        (Self { event_rx }, EventSource { event_tx })
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<RawEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receive a single event without blocking.
    pub fn try_recv(&self) -> Option<RawEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl EventSource {
    /// Forward an event. Returns `false` when the channel is full or
    /// the core side is gone.
    pub fn emit(&self, name: impl Into<String>, payload: Value) -> bool {
        self.event_tx
            .try_send(RawEvent {
                name: name.into(),
                payload,
            })
            .is_ok()
    }
}
