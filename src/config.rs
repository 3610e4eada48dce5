//! Configuration for the cycle extension
//!
//! Tunables that the host editor may persist alongside its own settings.
//! Stored as TOML, loaded/saved through [`ExtensionConfig::load`] and
//! [`ExtensionConfig::save`].

use crate::error::{LoopVisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Loop id assigned to freshly created cycle nodes.
pub const DEFAULT_LOOP_ID: &str = "ForLoop_1";

/// Upper bound on relay-chain hops during identifier resolution.
///
/// Relay chains are acyclic in practice; the cap only guards against
/// pathological graphs so resolution degrades to "not found" instead of
/// spinning.
pub const DEFAULT_MAX_RELAY_DEPTH: usize = 64;

/// Configuration for the cycle extension
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Maximum relay hops followed when tracing a loop identifier
    pub max_relay_depth: usize,

    /// Identifier widget/input names, in preference order
    pub identifier_inputs: Vec<String>,

    /// Loop id suggested for newly created cycle nodes
    pub default_loop_id: String,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            max_relay_depth: DEFAULT_MAX_RELAY_DEPTH,
            identifier_inputs: vec!["loop_id".to_string(), "filename".to_string()],
            default_loop_id: DEFAULT_LOOP_ID.to_string(),
        }
    }
}

impl ExtensionConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| LoopVisError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| LoopVisError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
