//! Error handling for the loopvis extension core
//!
//! Only boundary concerns (event decoding, configuration I/O) produce
//! errors. Graph traversal misses are ordinary `None` results — an absent
//! link, widget, or node is an expected state, not a failure.

use thiserror::Error;

/// Main error type for loopvis operations
#[derive(Error, Debug)]
pub enum LoopVisError {
    /// Errors related to inbound editor events
    #[error("Event error: {0}")]
    Event(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Event payload (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoopVisError>;
