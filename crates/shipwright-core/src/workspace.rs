//! Workspace enumeration
//!
//! Walks a workspace root for plugin projects and turns each one into a typed
//! `BuildUnit`. All descriptor validation happens here, at the enumeration
//! boundary, so the synchronizer core never inspects raw files or checks for
//! missing keys.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{Result, ShipwrightError};

/// Per-project descriptor file name, placed in each plugin project directory.
pub const DESCRIPTOR_FILE: &str = "plugin.toml";

/// Subdirectory of a plugin project where the packaging step drops artifacts.
pub const BUILD_DIR: &str = "build";

/// One buildable unit of the workspace.
///
/// `display_name` and `description` are optional on purpose: a project that
/// declares neither is a valid workspace member (shared library, example
/// code) but is not publishable and is skipped by the synchronizer.
#[derive(Debug, Clone)]
pub struct BuildUnit {
    /// Project directory name, used for artifact file names
    pub project: String,
    /// Version being built
    pub version: String,
    /// Human-readable plugin name
    pub display_name: Option<String>,
    /// Plugin description
    pub description: Option<String>,
    /// Expected path of the packaged artifact
    pub artifact: PathBuf,
}

impl BuildUnit {
    /// A unit participates in publishing only if it carries both a non-empty
    /// display name and a non-empty description.
    pub fn is_publishable(&self) -> bool {
        let has = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        has(&self.display_name) && has(&self.description)
    }

    /// Artifact file name, `{project}-{version}.{ext}` as produced by the
    /// packaging step and expected by download URLs.
    pub fn artifact_file_name(&self) -> String {
        self.artifact
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Descriptor {
    version: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Enumerate build units under `root`.
///
/// A plugin project is any immediate subdirectory containing a
/// `plugin.toml`. Results are sorted by path so repeated runs process
/// candidates in the same order.
pub fn enumerate_units(root: &Path, artifact_ext: &str) -> Result<Vec<BuildUnit>> {
    let mut units = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_name() != DESCRIPTOR_FILE || !entry.file_type().is_file() {
            continue;
        }

        let descriptor_path = entry.path();
        let project_dir = descriptor_path.parent().unwrap_or(root);
        let project = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let content = fs::read_to_string(descriptor_path)?;
        let descriptor: Descriptor =
            toml::from_str(&content).map_err(|e| ShipwrightError::DescriptorParse {
                path: descriptor_path.to_path_buf(),
                message: e.to_string(),
            })?;

        let artifact = project_dir.join(BUILD_DIR).join(format!(
            "{}-{}.{}",
            project, descriptor.version, artifact_ext
        ));

        units.push(BuildUnit {
            project,
            version: descriptor.version,
            display_name: descriptor.name,
            description: descriptor.description,
            artifact,
        });
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project(root: &Path, dir: &str, descriptor: &str) {
        let project_dir = root.join(dir);
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(project_dir.join(DESCRIPTOR_FILE), descriptor).unwrap();
    }

    #[test]
    fn test_enumerate_finds_projects_in_order() {
        let temp = TempDir::new().unwrap();
        write_project(
            temp.path(),
            "zeta-plugin",
            "version = \"0.2.0\"\nname = \"Zeta\"\ndescription = \"Z\"\n",
        );
        write_project(
            temp.path(),
            "alpha-plugin",
            "version = \"1.0.0\"\nname = \"Alpha\"\ndescription = \"A\"\n",
        );

        let units = enumerate_units(temp.path(), "jar").unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].project, "alpha-plugin");
        assert_eq!(units[1].project, "zeta-plugin");
        assert_eq!(
            units[0].artifact,
            temp.path().join("alpha-plugin/build/alpha-plugin-1.0.0.jar")
        );
    }

    #[test]
    fn test_directories_without_descriptor_are_not_candidates() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        write_project(temp.path(), "real", "version = \"1.0.0\"\n");

        let units = enumerate_units(temp.path(), "jar").unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].project, "real");
    }

    #[test]
    fn test_descriptor_without_metadata_is_not_publishable() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "lib-only", "version = \"1.0.0\"\n");
        write_project(
            temp.path(),
            "blank-name",
            "version = \"1.0.0\"\nname = \"  \"\ndescription = \"desc\"\n",
        );

        let units = enumerate_units(temp.path(), "jar").unwrap();
        assert!(units.iter().all(|u| !u.is_publishable()));
    }

    #[test]
    fn test_malformed_descriptor_is_fatal() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "broken", "version = [not toml");

        let err = enumerate_units(temp.path(), "jar").unwrap_err();
        assert!(matches!(err, ShipwrightError::DescriptorParse { .. }));
    }

    #[test]
    fn test_artifact_file_name() {
        let unit = BuildUnit {
            project: "demo".to_string(),
            version: "0.0.1".to_string(),
            display_name: Some("Demo".to_string()),
            description: Some("A demo".to_string()),
            artifact: PathBuf::from("/w/demo/build/demo-0.0.1.jar"),
        };
        assert_eq!(unit.artifact_file_name(), "demo-0.0.1.jar");
    }
}
