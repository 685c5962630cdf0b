use serde::{Deserialize, Serialize};

use crate::config::Preset;

/// Site-local adjustments to the built-in tool table, loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideFile {
    /// Schema version; currently must be "1.0".
    pub version: String,
    /// Entries replacing (or adding to) the built-in table.
    #[serde(default)]
    pub tools: Vec<ToolOverride>,
}

/// One tool entry in an override file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOverride {
    /// Exact executable name, matched case-sensitively.
    pub name: String,
    pub preset: Preset,
    /// Optional note on why the override exists.
    #[serde(default)]
    pub description: Option<String>,
}
