//! Resolved launch record handed to the process runtime

use crate::actions::OutputMode;
use serde::{Deserialize, Serialize};

/// Root structure of the resolved record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Resolved argument values, in declaration order
    pub arguments: Vec<(String, String)>,
    pub environment: Vec<(String, String)>,
    /// Nodes to spawn, in declaration order
    pub node: Vec<NodeRecord>,
    /// Names of conditional nodes whose condition resolved to false
    pub skipped: Vec<String>,
}

impl LaunchRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }

    pub fn node(&self, name: &str) -> Option<&NodeRecord> {
        self.node.iter().find(|n| n.name == name)
    }
}

/// Node record structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub executable: String,
    pub package: String,
    pub name: String,
    pub output: OutputMode,
    pub params: Vec<(String, String)>,
    pub remaps: Vec<(String, String)>,
    pub args: Option<Vec<String>>,
    pub cmd: Vec<String>,
    pub env: Option<Vec<(String, String)>>,
}
