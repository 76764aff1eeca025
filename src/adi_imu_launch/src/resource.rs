//! Package lookup and resource loading
//!
//! Every document is located relative to a single package share directory
//! that is resolved once per assembly. Paths are built from fixed segments
//! and never allowed to leave that directory, symlinks included.

use crate::error::{LaunchError, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

pub const URDF_DIR: &str = "urdf";
pub const CONFIG_DIR: &str = "config";

/// Maps a package identifier to the install prefix that provides it
pub trait PackageIndex {
    /// Install prefix whose `share/<package>` directory holds the package
    fn find_prefix(&self, package: &str) -> Option<PathBuf>;
}

/// Ament-style index over an ordered list of install prefixes
#[derive(Debug, Clone, Default)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
}

impl AmentIndex {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Parse a colon-separated prefix list such as `AMENT_PREFIX_PATH`
    pub fn from_prefix_path(prefix_path: &str) -> Self {
        Self::new(
            prefix_path
                .split(':')
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect(),
        )
    }

    /// `AMENT_PREFIX_PATH` first, then `/opt/ros/$ROS_DISTRO`
    pub fn from_env() -> Self {
        let mut index = std::env::var("AMENT_PREFIX_PATH")
            .map(|p| Self::from_prefix_path(&p))
            .unwrap_or_default();

        if let Ok(distro) = std::env::var("ROS_DISTRO") {
            let distro_prefix = PathBuf::from(format!("/opt/ros/{}", distro));
            if !index.prefixes.contains(&distro_prefix) {
                index.prefixes.push(distro_prefix);
            }
        }

        if index.prefixes.is_empty() {
            log::warn!("Neither AMENT_PREFIX_PATH nor ROS_DISTRO is set; no packages can be found");
        }
        index
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }
}

impl PackageIndex for AmentIndex {
    fn find_prefix(&self, package: &str) -> Option<PathBuf> {
        self.prefixes
            .iter()
            .find(|prefix| prefix.join("share").join(package).is_dir())
            .cloned()
    }
}

/// A document located inside the package share directory.
///
/// `content` is only populated for documents read eagerly; others are
/// handed to the consumer by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDocument {
    pub path: PathBuf,
    pub content: Option<String>,
}

/// Resolve the share directory of `package`.
pub fn resolve_base_directory(index: &dyn PackageIndex, package: &str) -> Result<PathBuf> {
    validate_package_name(package)?;

    let prefix = index
        .find_prefix(package)
        .ok_or_else(|| LaunchError::PackageNotFound(package.to_string()))?;

    let share_root = prefix
        .join("share")
        .canonicalize()
        .map_err(|_| LaunchError::PackageNotFound(package.to_string()))?;
    let base_dir = share_root
        .join(package)
        .canonicalize()
        .map_err(|_| LaunchError::PackageNotFound(package.to_string()))?;

    if !base_dir.starts_with(&share_root) {
        return Err(LaunchError::UnsafePath {
            path: base_dir.display().to_string(),
            reason: format!(
                "share directory of '{}' resolves outside {}",
                package,
                share_root.display()
            ),
        });
    }

    Ok(base_dir)
}

/// Loads documents from one package share directory
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    base_dir: PathBuf,
}

impl ResourceLoader {
    pub fn for_package(index: &dyn PackageIndex, package: &str) -> Result<Self> {
        let base_dir = resolve_base_directory(index, package)?;
        log::info!("using configurations from {}", base_dir.display());
        Ok(Self { base_dir })
    }

    /// Use an explicit directory as the base
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let base_dir = base_dir
            .canonicalize()
            .map_err(|source| LaunchError::ResourceReadError {
                path: base_dir.display().to_string(),
                source,
            })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Join `<subdir>/<file>` onto the base directory
    pub fn locate(&self, subdir: &str, file: &str) -> Result<PathBuf> {
        validate_segment(subdir)?;
        validate_segment(file)?;

        let dir = self.base_dir.join(subdir);
        let path = dir.join(file);

        // Either the file or, if it does not exist yet, its directory may be
        // a symlink pointing elsewhere
        for candidate in [&path, &dir] {
            if let Ok(canonical) = candidate.canonicalize() {
                self.ensure_inside(&path, &canonical)?;
                break;
            }
        }

        Ok(path)
    }

    pub fn read_text(&self, path: &Path) -> Result<String> {
        let read_error = |source: std::io::Error| LaunchError::ResourceReadError {
            path: path.display().to_string(),
            source,
        };

        let canonical = path.canonicalize().map_err(read_error)?;
        self.ensure_inside(path, &canonical)?;

        log::debug!("Reading {}", canonical.display());
        fs::read_to_string(&canonical).map_err(read_error)
    }

    fn ensure_inside(&self, path: &Path, canonical: &Path) -> Result<()> {
        if canonical.starts_with(&self.base_dir) {
            Ok(())
        } else {
            Err(LaunchError::UnsafePath {
                path: path.display().to_string(),
                reason: format!(
                    "resolves to {}, outside {}",
                    canonical.display(),
                    self.base_dir.display()
                ),
            })
        }
    }

    /// Locate a document and read its content now
    pub fn load(&self, subdir: &str, file: &str) -> Result<ResourceDocument> {
        let path = self.locate(subdir, file)?;
        let content = self.read_text(&path)?;
        Ok(ResourceDocument {
            path,
            content: Some(content),
        })
    }

    /// Locate a document whose content is read later by someone else
    pub fn reference(&self, subdir: &str, file: &str) -> Result<ResourceDocument> {
        Ok(ResourceDocument {
            path: self.locate(subdir, file)?,
            content: None,
        })
    }
}

pub(crate) fn validate_package_name(package: &str) -> Result<()> {
    let mut chars = package.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(LaunchError::UnsafePath {
            path: package.to_string(),
            reason: "not a valid package name".to_string(),
        })
    }
}

/// A segment must be exactly one plain path component
fn validate_segment(segment: &str) -> Result<()> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(LaunchError::UnsafePath {
            path: segment.to_string(),
            reason: "expected a single relative path segment".to_string(),
        }),
    }
}
