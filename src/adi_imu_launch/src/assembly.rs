//! Bring-up graph assembly

use crate::{
    actions::{
        apply_to_process, ArgumentRegistry, ArgumentValue, EnvironmentConfigurator,
        EnvironmentDirective, LaunchArgument, NodeAction, NodeDescriptor, NodeDescriptorBuilder,
    },
    error::{LaunchError, Result},
};
use serde::Serialize;
use std::collections::HashSet;

/// The finished, immutable bring-up descriptor handed to the runtime.
///
/// Node order follows declaration order. It is not a spawn order: the
/// consumer decides sequencing and parallelism.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BringupDescriptor {
    arguments: Vec<LaunchArgument>,
    environment: Vec<EnvironmentDirective>,
    nodes: Vec<NodeDescriptor>,
}

impl BringupDescriptor {
    pub fn arguments(&self) -> &[LaunchArgument] {
        &self.arguments
    }

    pub fn environment(&self) -> &[EnvironmentDirective] {
        &self.environment
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    /// Export the session environment into this process. Never undone.
    pub fn apply_environment(&self) {
        apply_to_process(&self.environment);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }
}

/// Validate global invariants and freeze the parts into a descriptor
pub fn assemble(
    arguments: Vec<LaunchArgument>,
    environment: Vec<EnvironmentDirective>,
    nodes: Vec<NodeDescriptor>,
) -> Result<BringupDescriptor> {
    let mut argument_names = HashSet::new();
    for argument in &arguments {
        if !argument_names.insert(argument.name.as_str()) {
            return Err(LaunchError::InvalidDescriptor(format!(
                "launch argument '{}' declared more than once",
                argument.name
            )));
        }
    }

    let mut variable_names = HashSet::new();
    for directive in &environment {
        if !variable_names.insert(directive.variable_name.as_str()) {
            return Err(LaunchError::InvalidDescriptor(format!(
                "environment variable '{}' set more than once",
                directive.variable_name
            )));
        }
    }

    let mut node_names = HashSet::new();
    for node in &nodes {
        if !node_names.insert(node.name()) {
            return Err(LaunchError::InvalidDescriptor(format!(
                "node name '{}' used more than once",
                node.name()
            )));
        }

        if let Some(argument) = node.condition().argument() {
            if !argument_names.contains(argument) {
                return Err(LaunchError::InvalidDescriptor(format!(
                    "node '{}' is conditional on undeclared argument '{}'",
                    node.name(),
                    argument
                )));
            }
        }
    }

    Ok(BringupDescriptor {
        arguments,
        environment,
        nodes,
    })
}

/// In-progress assembly owning the argument, environment and node sequences
#[derive(Debug, Default)]
pub struct LaunchAssembly {
    arguments: ArgumentRegistry,
    environment: EnvironmentConfigurator,
    builder: NodeDescriptorBuilder,
    nodes: Vec<NodeDescriptor>,
}

impl LaunchAssembly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_argument(
        &mut self,
        name: impl Into<String>,
        default_value: impl Into<ArgumentValue>,
        description: impl Into<String>,
    ) -> Result<LaunchArgument> {
        self.arguments.declare(name, default_value, description)
    }

    pub fn set_env(&mut self, variable_name: impl Into<String>, value: impl Into<String>) {
        self.environment.set(variable_name, value);
    }

    pub fn add_node(&mut self, action: NodeAction) -> Result<()> {
        self.nodes.push(self.builder.build(action)?);
        Ok(())
    }

    pub fn finish(self) -> Result<BringupDescriptor> {
        assemble(
            self.arguments.into_arguments(),
            self.environment.into_directives(),
            self.nodes,
        )
    }
}
