//! Loop-identifier resolution and cycle advancement.
//!
//! [`resolver`] answers "which loop does this node belong to" by
//! walking the graph; [`advancer`] bumps every distinct identifier
//! source once on a "new cycle" action; [`suffix`] holds the counter
//! rules both share.

pub mod advancer;
pub mod resolver;
pub mod suffix;

pub use advancer::CycleAdvancer;
pub use resolver::{IdentifierOrigin, LoopResolver};
pub use suffix::{advance_branch, advance_counter};
