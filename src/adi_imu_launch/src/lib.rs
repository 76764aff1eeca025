//! adi_imu_launch library
//!
//! Builds the bring-up descriptor of the ADIS16470 IMU pipeline and, for
//! consumers that want it, resolves that descriptor into a launch record.

pub mod actions;
pub mod assembly;
pub mod bringup;
pub mod condition;
pub mod context;
pub mod error;
pub mod record;
pub mod resource;

pub use assembly::{assemble, BringupDescriptor, LaunchAssembly};
pub use bringup::{generate_launch_description, BringupConfig};
pub use error::{LaunchError, ResolveError, Result};

use context::LaunchContext;
use record::{CommandGenerator, LaunchRecord};
use resource::PackageIndex;
use std::collections::HashMap;

/// Evaluate a descriptor against launch-argument overrides.
///
/// Nodes whose condition resolves to false are listed in `skipped` and get
/// no command line. Nothing is spawned.
pub fn resolve_launch(
    descriptor: &BringupDescriptor,
    overrides: &HashMap<String, String>,
    index: &dyn PackageIndex,
) -> std::result::Result<LaunchRecord, ResolveError> {
    let context = LaunchContext::from_arguments(descriptor.arguments(), overrides);

    let mut record = LaunchRecord::new();
    record.arguments = descriptor
        .arguments()
        .iter()
        .filter_map(|a| {
            context
                .get_configuration(&a.name)
                .map(|v| (a.name.clone(), v.to_string()))
        })
        .collect();
    record.environment = descriptor
        .environment()
        .iter()
        .map(|d| (d.variable_name.clone(), d.value.clone()))
        .collect();

    for node in descriptor.nodes() {
        if !node.condition().evaluate(&context)? {
            log::debug!("Skipping {} due to condition", node.name());
            record.skipped.push(node.name().to_string());
            continue;
        }
        record.node.push(CommandGenerator::generate_node_record(
            node,
            descriptor.environment(),
            index,
        ));
    }

    Ok(record)
}
