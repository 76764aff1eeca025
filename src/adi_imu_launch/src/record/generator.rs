//! Command-line and record generation

use crate::actions::{EnvironmentDirective, NodeDescriptor, ParameterValue};
use crate::record::types::NodeRecord;
use crate::resource::{validate_package_name, PackageIndex};

pub struct CommandGenerator;

impl CommandGenerator {
    pub fn generate_node_record(
        node: &NodeDescriptor,
        environment: &[EnvironmentDirective],
        index: &dyn PackageIndex,
    ) -> NodeRecord {
        let cmd = Self::generate_node_command(node, index);

        let params = node
            .parameters()
            .iter()
            .map(|p| (p.name.clone(), p.value.to_string()))
            .collect();

        let remaps = node
            .remappings()
            .iter()
            .map(|r| (r.from.clone(), r.to.clone()))
            .collect();

        let env = if environment.is_empty() {
            None
        } else {
            Some(
                environment
                    .iter()
                    .map(|d| (d.variable_name.clone(), d.value.clone()))
                    .collect(),
            )
        };

        NodeRecord {
            executable: node.executable().to_string(),
            package: node.package().to_string(),
            name: node.name().to_string(),
            output: node.output(),
            params,
            remaps,
            args: if node.arguments().is_empty() {
                None
            } else {
                Some(node.arguments().to_vec())
            },
            cmd,
            env,
        }
    }

    pub fn generate_node_command(node: &NodeDescriptor, index: &dyn PackageIndex) -> Vec<String> {
        let mut cmd = Vec::new();

        // 1. Executable path
        cmd.push(Self::resolve_executable_path(
            node.package(),
            node.executable(),
            index,
        ));

        // 2. Positional arguments come before the ROS args
        cmd.extend(node.arguments().iter().cloned());

        // 3. ROS args delimiter
        cmd.push("--ros-args".to_string());

        // 4. Node name
        cmd.push("-r".to_string());
        cmd.push(format!("__node:={}", node.name()));

        // 5. Remappings
        for remap in node.remappings() {
            cmd.push("-r".to_string());
            cmd.push(format!("{}:={}", remap.from, remap.to));
        }

        // 6. Parameters
        for param in node.parameters() {
            cmd.push("-p".to_string());
            cmd.push(format!(
                "{}:={}",
                param.name,
                Self::ros_arg_value(&param.value)
            ));
        }

        cmd
    }

    /// Render a value the way `-p name:=value` parses it back: as YAML.
    /// Strings are always double-quoted so "true", "1" or text containing
    /// ": " keep their string type.
    fn ros_arg_value(value: &ParameterValue) -> String {
        match value {
            ParameterValue::String(s) => serde_json::Value::String(s.clone()).to_string(),
            ParameterValue::Double(d) if d.is_nan() => ".nan".to_string(),
            ParameterValue::Double(d) if d.is_infinite() => {
                let sign = if *d < 0.0 { "-" } else { "" };
                format!("{}.inf", sign)
            }
            other => other.to_string(),
        }
    }

    fn resolve_executable_path(
        package: &str,
        executable: &str,
        index: &dyn PackageIndex,
    ) -> String {
        if validate_package_name(package).is_ok() {
            if let Some(prefix) = index.find_prefix(package) {
                return prefix
                    .join("lib")
                    .join(package)
                    .join(executable)
                    .display()
                    .to_string();
            }
        }

        log::debug!(
            "Package {} not installed; using bare executable name {}",
            package,
            executable
        );
        executable.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{NodeAction, NodeDescriptorBuilder, OutputMode};
    use crate::resource::AmentIndex;
    use std::path::PathBuf;

    fn build(action: NodeAction) -> NodeDescriptor {
        NodeDescriptorBuilder::new().build(action).unwrap()
    }

    #[test]
    fn test_generate_simple_command() {
        let node = build(NodeAction::new("adi_imu_ros2", "adis16470_node", "adis16470_node"));
        let cmd = CommandGenerator::generate_node_command(&node, &AmentIndex::default());

        assert_eq!(
            cmd,
            vec!["adis16470_node", "--ros-args", "-r", "__node:=adis16470_node"]
        );
    }

    #[test]
    fn test_generate_command_with_params_and_remaps() {
        let node = build(
            NodeAction::new("imu_filter_madgwick", "imu_filter_madgwick_node", "imu_filter")
                .parameter("use_mag", false)
                .parameter("fixed_frame", "imu_viz_fixed")
                .remap("imu/data_raw", "imu"),
        );
        let cmd = CommandGenerator::generate_node_command(&node, &AmentIndex::default());

        assert_eq!(
            cmd,
            vec![
                "imu_filter_madgwick_node",
                "--ros-args",
                "-r",
                "__node:=imu_filter",
                "-r",
                "imu/data_raw:=imu",
                "-p",
                "use_mag:=false",
                "-p",
                "fixed_frame:=\"imu_viz_fixed\"",
            ]
        );
    }

    #[test]
    fn test_string_parameters_keep_their_type() {
        let node = build(
            NodeAction::new("robot_state_publisher", "robot_state_publisher", "rsp")
                .parameter("flag", "true")
                .parameter("count", "1")
                .parameter("robot_description", "<robot name=\"a: b\">\n  <link/>\n</robot>")
                .parameter("use_sim_time", false)
                .parameter("rate", 100.0),
        );
        let cmd = CommandGenerator::generate_node_command(&node, &AmentIndex::default());

        assert!(cmd.contains(&"flag:=\"true\"".to_string()));
        assert!(cmd.contains(&"count:=\"1\"".to_string()));
        assert!(cmd.contains(&"use_sim_time:=false".to_string()));
        assert!(cmd.contains(&"rate:=100.0".to_string()));

        // The quoted value reads back as the exact original string
        let description = cmd
            .iter()
            .find_map(|arg| arg.strip_prefix("robot_description:="))
            .unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(description).unwrap();
        assert_eq!(
            parsed,
            serde_yaml::Value::String("<robot name=\"a: b\">\n  <link/>\n</robot>".to_string())
        );
    }

    #[test]
    fn test_positional_arguments_precede_ros_args() {
        let node = build(
            NodeAction::new("rviz2", "rviz2", "rviz2_imu")
                .argument("-d")
                .argument("/ws/share/adi_imu_ros2/config/adis16470.rviz"),
        );
        let cmd = CommandGenerator::generate_node_command(&node, &AmentIndex::default());

        assert_eq!(cmd[1], "-d");
        assert_eq!(cmd[2], "/ws/share/adi_imu_ros2/config/adis16470.rviz");
        assert_eq!(cmd[3], "--ros-args");
    }

    #[test]
    fn test_executable_path_from_prefix() {
        let prefix = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(prefix.path().join("share").join("rviz2")).unwrap();
        let index = AmentIndex::new(vec![prefix.path().to_path_buf()]);

        let node = build(NodeAction::new("rviz2", "rviz2", "rviz2_imu"));
        let cmd = CommandGenerator::generate_node_command(&node, &index);

        let expected: PathBuf = prefix.path().join("lib").join("rviz2").join("rviz2");
        assert_eq!(cmd[0], expected.display().to_string());
    }

    #[test]
    fn test_generate_node_record() {
        let node = build(
            NodeAction::new("imu_filter_madgwick", "imu_filter_madgwick_node", "imu_filter")
                .output(OutputMode::Screen)
                .parameter("use_mag", false)
                .remap("imu/data_raw", "imu"),
        );
        let env = vec![EnvironmentDirective {
            variable_name: "RCUTILS_COLORIZED_OUTPUT".to_string(),
            value: "1".to_string(),
        }];

        let record = CommandGenerator::generate_node_record(&node, &env, &AmentIndex::default());
        assert_eq!(record.name, "imu_filter");
        assert_eq!(record.package, "imu_filter_madgwick");
        assert_eq!(record.output, OutputMode::Screen);
        assert_eq!(record.params, vec![("use_mag".to_string(), "false".to_string())]);
        assert_eq!(record.remaps, vec![("imu/data_raw".to_string(), "imu".to_string())]);
        assert_eq!(record.args, None);
        assert_eq!(
            record.env,
            Some(vec![("RCUTILS_COLORIZED_OUTPUT".to_string(), "1".to_string())])
        );
    }
}
