//! Launch actions: arguments, environment directives and nodes

pub mod declare_argument;
pub mod node;
pub mod set_env;

pub use declare_argument::{ArgumentRegistry, ArgumentValue, LaunchArgument};
pub use node::{
    NodeAction, NodeDescriptor, NodeDescriptorBuilder, OutputMode, Parameter, ParameterValue,
    Remapping,
};
pub use set_env::{apply_to_process, EnvironmentConfigurator, EnvironmentDirective};
