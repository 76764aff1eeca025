//! Resolved launch record generation

pub mod generator;
pub mod types;

pub use generator::CommandGenerator;
pub use types::{LaunchRecord, NodeRecord};
