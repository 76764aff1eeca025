//! Declare argument action and the registry of launch-time arguments

use crate::error::{LaunchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default value of a launch argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Bool(bool),
    Text(String),
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::Bool(b) => write!(f, "{}", b),
            ArgumentValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Bool(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::Text(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::Text(value)
    }
}

/// A declared launch argument. Its value is only resolved by the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchArgument {
    pub name: String,
    pub default_value: ArgumentValue,
    pub description: String,
}

/// Ordered set of launch arguments declared during one assembly
#[derive(Debug, Default)]
pub struct ArgumentRegistry {
    arguments: Vec<LaunchArgument>,
}

impl ArgumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(
        &mut self,
        name: impl Into<String>,
        default_value: impl Into<ArgumentValue>,
        description: impl Into<String>,
    ) -> Result<LaunchArgument> {
        let name = name.into();
        if self.contains(&name) {
            return Err(LaunchError::DuplicateArgument(name));
        }

        let argument = LaunchArgument {
            name,
            default_value: default_value.into(),
            description: description.into(),
        };
        log::debug!(
            "Declared launch argument '{}' (default: {})",
            argument.name,
            argument.default_value
        );
        self.arguments.push(argument.clone());
        Ok(argument)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arguments.iter().any(|a| a.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&LaunchArgument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    pub fn arguments(&self) -> &[LaunchArgument] {
        &self.arguments
    }

    pub fn into_arguments(self) -> Vec<LaunchArgument> {
        self.arguments
    }
}
