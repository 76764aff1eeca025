//! Error types for the adi_imu_launch descriptor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Package '{0}' not found. Ensure the package is installed and sourced.")]
    PackageNotFound(String),

    #[error("Failed to read resource {path}: {source}")]
    ResourceReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing path {path}: {reason}")]
    UnsafePath { path: String, reason: String },

    #[error("Launch argument '{0}' is already declared")]
    DuplicateArgument(String),

    #[error("Node name '{0}' is already used in this bring-up graph")]
    DuplicateNodeName(String),

    #[error("Invalid bring-up descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while a consumer evaluates a finished descriptor
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Undefined launch argument: '{0}'. Did you forget to declare it?")]
    UndefinedArgument(String),

    #[error("Launch argument '{name}' has value '{value}', which is not a boolean")]
    InvalidBoolean { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, LaunchError>;
