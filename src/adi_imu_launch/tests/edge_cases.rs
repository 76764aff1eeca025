use adi_imu_launch::{
    actions::ParameterValue, generate_launch_description, resource::AmentIndex, BringupConfig,
    LaunchError,
};
use std::{fs, path::Path};
use tempfile::TempDir;

const URDF: &str = "<?xml version=\"1.0\"?>\n<robot name=\"adis16470_breakout\"/>\n";

/// Lay out `<prefix>/share/adi_imu_ros2/{urdf,config}`
fn install(prefix: &Path, with_urdf: bool) {
    let share = prefix.join("share/adi_imu_ros2");
    fs::create_dir_all(share.join("urdf")).unwrap();
    fs::create_dir_all(share.join("config")).unwrap();
    if with_urdf {
        fs::write(share.join("urdf/adis16470_breakout.urdf"), URDF).unwrap();
    }
    fs::write(share.join("config/adis16470.rviz"), "Panels: []\n").unwrap();
}

fn index(prefix: &TempDir) -> AmentIndex {
    AmentIndex::new(vec![prefix.path().to_path_buf()])
}

#[test]
fn test_missing_urdf() {
    let prefix = TempDir::new().unwrap();
    install(prefix.path(), false);

    let result = generate_launch_description(&index(&prefix), &BringupConfig::default());
    let err = result.unwrap_err();
    assert!(
        matches!(err, LaunchError::ResourceReadError { .. }),
        "expected ResourceReadError, got {}",
        err
    );
    assert!(err.to_string().contains("adis16470_breakout.urdf"));
}

#[test]
fn test_missing_rviz_config_is_not_an_error() {
    let prefix = TempDir::new().unwrap();
    install(prefix.path(), true);
    fs::remove_file(prefix.path().join("share/adi_imu_ros2/config/adis16470.rviz")).unwrap();

    // The rviz config is only referenced; the visualizer reads it itself
    assert!(generate_launch_description(&index(&prefix), &BringupConfig::default()).is_ok());
}

#[test]
fn test_package_not_installed() {
    let prefix = TempDir::new().unwrap();
    fs::create_dir_all(prefix.path().join("share")).unwrap();

    let err =
        generate_launch_description(&index(&prefix), &BringupConfig::default()).unwrap_err();
    assert!(matches!(err, LaunchError::PackageNotFound(ref p) if p == "adi_imu_ros2"));
}

#[test]
fn test_empty_index() {
    let err = generate_launch_description(&AmentIndex::default(), &BringupConfig::default())
        .unwrap_err();
    assert!(matches!(err, LaunchError::PackageNotFound(_)));
}

#[test]
fn test_crafted_package_identifier_rejected() {
    let prefix = TempDir::new().unwrap();
    install(prefix.path(), true);

    let config = BringupConfig {
        package: "../share/adi_imu_ros2".to_string(),
        ..BringupConfig::default()
    };
    let err = generate_launch_description(&index(&prefix), &config).unwrap_err();
    assert!(matches!(err, LaunchError::UnsafePath { .. }));
}

#[test]
fn test_crafted_document_name_rejected() {
    let prefix = TempDir::new().unwrap();
    install(prefix.path(), true);
    fs::write(prefix.path().join("share/secret.urdf"), "<robot/>").unwrap();

    let config = BringupConfig {
        urdf_file: "../../secret.urdf".to_string(),
        ..BringupConfig::default()
    };
    let err = generate_launch_description(&index(&prefix), &config).unwrap_err();
    assert!(matches!(err, LaunchError::UnsafePath { .. }));

    let config = BringupConfig {
        rviz_config_file: "/etc/passwd".to_string(),
        ..BringupConfig::default()
    };
    let err = generate_launch_description(&index(&prefix), &config).unwrap_err();
    assert!(matches!(err, LaunchError::UnsafePath { .. }));
}

#[cfg(unix)]
#[test]
fn test_share_symlink_outside_install_root_rejected() {
    let prefix = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    install(elsewhere.path(), true);
    fs::create_dir_all(prefix.path().join("share")).unwrap();
    std::os::unix::fs::symlink(
        elsewhere.path().join("share/adi_imu_ros2"),
        prefix.path().join("share/adi_imu_ros2"),
    )
    .unwrap();

    let err =
        generate_launch_description(&index(&prefix), &BringupConfig::default()).unwrap_err();
    assert!(matches!(err, LaunchError::UnsafePath { .. }));
}

#[test]
fn test_urdf_captured_by_value() {
    let prefix = TempDir::new().unwrap();
    install(prefix.path(), true);

    let descriptor =
        generate_launch_description(&index(&prefix), &BringupConfig::default()).unwrap();

    // Rewriting the file afterwards does not affect the built descriptor
    fs::write(
        prefix
            .path()
            .join("share/adi_imu_ros2/urdf/adis16470_breakout.urdf"),
        "<robot name=\"changed\"/>",
    )
    .unwrap();

    let rsp = descriptor.node("robot_state_publisher").unwrap();
    assert_eq!(
        rsp.parameter("robot_description"),
        Some(&ParameterValue::String(URDF.to_string()))
    );
}

#[test]
fn test_non_utf8_urdf() {
    let prefix = TempDir::new().unwrap();
    install(prefix.path(), false);
    fs::write(
        prefix
            .path()
            .join("share/adi_imu_ros2/urdf/adis16470_breakout.urdf"),
        [0xc3, 0x28, 0xa0, 0xa1],
    )
    .unwrap();

    let err =
        generate_launch_description(&index(&prefix), &BringupConfig::default()).unwrap_err();
    assert!(matches!(err, LaunchError::ResourceReadError { .. }));
}

#[test]
fn test_empty_urdf_is_captured_verbatim() {
    let prefix = TempDir::new().unwrap();
    install(prefix.path(), false);
    fs::write(
        prefix
            .path()
            .join("share/adi_imu_ros2/urdf/adis16470_breakout.urdf"),
        "",
    )
    .unwrap();

    let descriptor =
        generate_launch_description(&index(&prefix), &BringupConfig::default()).unwrap();
    let rsp = descriptor.node("robot_state_publisher").unwrap();
    assert_eq!(
        rsp.parameter("robot_description"),
        Some(&ParameterValue::String(String::new()))
    );
}

#[test]
fn test_later_prefix_used_when_first_lacks_package() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::create_dir_all(first.path().join("share")).unwrap();
    install(second.path(), true);

    let index = AmentIndex::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
    assert!(generate_launch_description(&index, &BringupConfig::default()).is_ok());
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let err = BringupConfig::from_yaml_file(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, LaunchError::ResourceReadError { .. }));
}

#[test]
fn test_malformed_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "package: [unterminated\n").unwrap();

    let err = BringupConfig::from_yaml_file(&path).unwrap_err();
    assert!(matches!(err, LaunchError::Config(_)));
}
