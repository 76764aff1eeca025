//! Node action and the descriptors built from it

use crate::{
    condition::Condition,
    error::{LaunchError, Result},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// Where a process's stdout/stderr is routed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Screen,
    #[default]
    Log,
    Both,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputMode::Screen => "screen",
            OutputMode::Log => "log",
            OutputMode::Both => "both",
        };
        f.write_str(s)
    }
}

/// Typed ROS parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Integer(i) => write!(f, "{}", i),
            ParameterValue::Double(d) => write!(f, "{:?}", d),
            ParameterValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Double(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remapping {
    pub from: String,
    pub to: String,
}

/// Node action: everything needed to describe one process before it is
/// checked and frozen into a [`NodeDescriptor`].
#[derive(Debug, Clone)]
pub struct NodeAction {
    pub package: String,
    pub executable: String,
    pub name: String,
    pub output: OutputMode,
    pub parameters: Vec<Parameter>,
    pub remappings: Vec<Remapping>,
    pub arguments: Vec<String>,
    pub condition: Condition,
}

impl NodeAction {
    pub fn new(
        package: impl Into<String>,
        executable: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            executable: executable.into(),
            name: name.into(),
            output: OutputMode::default(),
            parameters: Vec::new(),
            remappings: Vec::new(),
            arguments: Vec::new(),
            condition: Condition::Unconditional,
        }
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn remap(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.remappings.push(Remapping {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }
}

/// One process's frozen launch specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    package: String,
    executable: String,
    name: String,
    output: OutputMode,
    parameters: Vec<Parameter>,
    remappings: Vec<Remapping>,
    arguments: Vec<String>,
    condition: Condition,
}

impl NodeDescriptor {
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub fn remappings(&self) -> &[Remapping] {
        &self.remappings
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

/// Builds node descriptors for one assembly, rejecting reused names
#[derive(Debug, Default)]
pub struct NodeDescriptorBuilder {
    names: HashSet<String>,
}

impl NodeDescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self, action: NodeAction) -> Result<NodeDescriptor> {
        for (field, value) in [
            ("package", &action.package),
            ("executable", &action.executable),
        ] {
            if value.trim().is_empty() {
                return Err(LaunchError::InvalidDescriptor(format!(
                    "node '{}' has an empty {}",
                    action.name, field
                )));
            }
        }
        validate_node_name(&action.name)?;

        for remap in &action.remappings {
            if remap.from.is_empty() || remap.to.is_empty() {
                return Err(LaunchError::InvalidDescriptor(format!(
                    "node '{}' has an empty remapping '{}' -> '{}'",
                    action.name, remap.from, remap.to
                )));
            }
        }

        if !self.names.insert(action.name.clone()) {
            return Err(LaunchError::DuplicateNodeName(action.name));
        }

        log::debug!(
            "Built node descriptor {} ({}/{}, output={}, {} params, {} remaps{})",
            action.name,
            action.package,
            action.executable,
            action.output,
            action.parameters.len(),
            action.remappings.len(),
            if action.condition.is_conditional() {
                ", conditional"
            } else {
                ""
            }
        );

        Ok(NodeDescriptor {
            package: action.package,
            executable: action.executable,
            name: action.name,
            output: action.output,
            parameters: action.parameters,
            remappings: action.remappings,
            arguments: action.arguments,
            condition: action.condition,
        })
    }
}

/// ROS node names: a letter or underscore followed by alphanumerics or underscores
fn validate_node_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(LaunchError::InvalidDescriptor(format!(
            "invalid node name '{}'",
            name
        )))
    }
}
