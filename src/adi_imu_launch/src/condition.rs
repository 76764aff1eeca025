//! Inclusion conditions attached to node descriptors
//!
//! A condition is plain data. It is never evaluated while the descriptor is
//! assembled; the consumer tests it against resolved argument values right
//! before spawning.

use crate::{context::LaunchContext, error::ResolveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Unconditional,
    /// Included when the named argument resolves to `expected`
    ConditionalOn { argument: String, expected: bool },
}

impl Condition {
    /// `if` condition: include when the argument is true
    pub fn if_argument(argument: impl Into<String>) -> Self {
        Condition::ConditionalOn {
            argument: argument.into(),
            expected: true,
        }
    }

    /// `unless` condition: include when the argument is false
    pub fn unless_argument(argument: impl Into<String>) -> Self {
        Condition::ConditionalOn {
            argument: argument.into(),
            expected: false,
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, Condition::ConditionalOn { .. })
    }

    /// Name of the argument this condition depends on, if any
    pub fn argument(&self) -> Option<&str> {
        match self {
            Condition::Unconditional => None,
            Condition::ConditionalOn { argument, .. } => Some(argument),
        }
    }

    pub fn evaluate(&self, context: &LaunchContext) -> Result<bool, ResolveError> {
        match self {
            Condition::Unconditional => Ok(true),
            Condition::ConditionalOn { argument, expected } => {
                let value = context
                    .get_configuration(argument)
                    .ok_or_else(|| ResolveError::UndefinedArgument(argument.clone()))?;
                Ok(parse_bool(argument, value)? == *expected)
            }
        }
    }
}

/// Interpret a launch argument value as a boolean
pub(crate) fn parse_bool(name: &str, value: &str) -> Result<bool, ResolveError> {
    let normalized = value.trim().to_lowercase();
    match normalized.as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ResolveError::InvalidBoolean {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
