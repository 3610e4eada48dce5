//! Execution-state tracking.
//!
//! [`registry`] holds the key→status map that execution events write
//! and badges read; [`events`] carries the inbound event stream and its
//! typed decoding.

pub mod events;
pub mod registry;

pub use events::{EditorEvent, EventBridge, EventSource, RawEvent, TimerMode};
pub use registry::{keys, StateRegistry};
