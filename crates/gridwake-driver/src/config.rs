//! Policy configuration parsing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use gridwake_state::NodeId;

/// Root of the driver's TOML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverConfig {
    /// One entry per managed candidate node.
    #[serde(default, rename = "policy")]
    pub policies: Vec<PolicyConfig>,
}

/// One (candidate node, label, ceiling) binding.
///
/// The label name is resolved against the fleet's registry when the
/// driver is assembled, not here; parsing only checks shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfig {
    /// The offline candidate node this policy watches.
    pub node: NodeId,
    /// Capability label whose occupancy is capped.
    pub label: String,
    /// Maximum simultaneous Online-or-Connecting nodes carrying the label.
    pub max_nodes: u32,
}

impl DriverConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }
}
