//! ADIS16470 bring-up: state publisher, driver, Madgwick filter and rviz

use crate::{
    actions::{NodeAction, OutputMode},
    assembly::{BringupDescriptor, LaunchAssembly},
    condition::Condition,
    error::{LaunchError, Result},
    resource::{PackageIndex, ResourceLoader, CONFIG_DIR, URDF_DIR},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const WITH_RVIZ: &str = "with_rviz";
pub const COLORIZED_OUTPUT_ENV: &str = "RCUTILS_COLORIZED_OUTPUT";
pub const CONSOLE_OUTPUT_FORMAT_ENV: &str = "RCUTILS_CONSOLE_OUTPUT_FORMAT";
pub const CONSOLE_OUTPUT_FORMAT: &str = "[{severity}] [{name}]: {message}";

/// Which package and documents the bring-up reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BringupConfig {
    pub package: String,
    pub urdf_file: String,
    pub rviz_config_file: String,
}

impl Default for BringupConfig {
    fn default() -> Self {
        Self {
            package: "adi_imu_ros2".to_string(),
            urdf_file: "adis16470_breakout.urdf".to_string(),
            rviz_config_file: "adis16470.rviz".to_string(),
        }
    }
}

impl BringupConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| LaunchError::Config(e.to_string()))
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| LaunchError::ResourceReadError {
                path: path.display().to_string(),
                source,
            })?;
        serde_yaml::from_str(&content)
            .map_err(|e| LaunchError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Assemble the IMU bring-up graph.
///
/// The robot description is read once, here; its text is copied into the
/// state publisher's parameters. The rviz config is passed by path.
pub fn generate_launch_description(
    index: &dyn PackageIndex,
    config: &BringupConfig,
) -> Result<BringupDescriptor> {
    let mut assembly = LaunchAssembly::new();

    assembly.set_env(COLORIZED_OUTPUT_ENV, "1");
    assembly.set_env(CONSOLE_OUTPUT_FORMAT_ENV, CONSOLE_OUTPUT_FORMAT);

    let loader = ResourceLoader::for_package(index, &config.package)?;
    let urdf = loader.load(URDF_DIR, &config.urdf_file)?;
    let rviz_config = loader.reference(CONFIG_DIR, &config.rviz_config_file)?;

    let urdf_path = urdf.path.display().to_string();
    let robot_description = urdf.content.unwrap_or_default();

    assembly.declare_argument(WITH_RVIZ, false, "launch rviz node to visualize")?;

    assembly.add_node(
        NodeAction::new(
            "robot_state_publisher",
            "robot_state_publisher",
            "robot_state_publisher",
        )
        .output(OutputMode::Screen)
        .parameter("use_sim_time", false)
        .parameter("robot_description", robot_description)
        .argument(urdf_path),
    )?;

    assembly.add_node(NodeAction::new(
        config.package.as_str(),
        "adis16470_node",
        "adis16470_node",
    ))?;

    assembly.add_node(
        NodeAction::new("imu_filter_madgwick", "imu_filter_madgwick_node", "imu_filter")
            .output(OutputMode::Screen)
            .parameter("use_mag", false)
            .parameter("fixed_frame", "imu_viz_fixed")
            .remap("imu/data_raw", "imu"),
    )?;

    assembly.add_node(
        NodeAction::new("rviz2", "rviz2", "rviz2_imu")
            .argument("-d")
            .argument(rviz_config.path.display().to_string())
            .condition(Condition::if_argument(WITH_RVIZ)),
    )?;

    assembly.finish()
}
