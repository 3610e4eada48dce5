//! Ports of an editor graph node.
//!
//! Input ports carry at most one incoming link, output ports fan out to
//! any number of links. Port types are plain strings owned by the host
//! editor; `"*"` marks a generic port whose concrete type is not yet
//! known.

use crate::graph::id::LinkId;

/// Type tag of a port whose concrete type is unresolved.
pub const WILDCARD: &str = "*";

/// RGB link color cached on a port. Computed by the host editor's
/// type→color table; the core only stores and forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LinkColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An input port: zero or one incoming link.
#[derive(Debug, Clone)]
pub struct InputPort {
    pub name: String,
    pub port_type: String,
    pub link: Option<LinkId>,
    /// Cached link color for the current type, if the host provides one.
    pub color: Option<LinkColor>,
}

impl InputPort {
    pub fn new(name: impl Into<String>, port_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port_type: port_type.into(),
            link: None,
            color: None,
        }
    }

    /// A generic input starting at the wildcard type.
    pub fn generic(name: impl Into<String>) -> Self {
        Self::new(name, WILDCARD)
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.port_type == WILDCARD
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }
}

/// An output port: zero or more outgoing links.
#[derive(Debug, Clone)]
pub struct OutputPort {
    pub name: String,
    pub port_type: String,
    pub links: Vec<LinkId>,
    /// Cached link color for the current type, if the host provides one.
    pub color: Option<LinkColor>,
}

impl OutputPort {
    pub fn new(name: impl Into<String>, port_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port_type: port_type.into(),
            links: Vec::new(),
            color: None,
        }
    }

    /// A generic output starting at the wildcard type.
    pub fn generic(name: impl Into<String>) -> Self {
        Self::new(name, WILDCARD)
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.port_type == WILDCARD
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        !self.links.is_empty()
    }
}
