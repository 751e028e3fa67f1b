//! Catalog discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::{EntityId, EntityPrefix};

/// Represents an OSB catalog
#[derive(Debug)]
pub struct Project {
    /// Root directory of the catalog (parent of .osb/)
    root: PathBuf,
}

impl Project {
    /// Find catalog root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find catalog root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            let osb_dir = current.join(".osb");
            if osb_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new catalog structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let osb_dir = root.join(".osb");
        if osb_dir.exists() {
            return Err(ProjectError::AlreadyExists(root.clone()));
        }

        std::fs::create_dir_all(&osb_dir).map_err(|e| ProjectError::IoError(e.to_string()))?;

        let config_path = osb_dir.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Self::create_catalog_dirs(&root)?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# OSB Catalog Configuration

# Default author for new entries (can be overridden by global config)
# author: ""

# Editor to use for `osb <entity> edit` commands (default: $EDITOR)
# editor: ""

# Default output format (auto, yaml, tsv, json, csv, md, id)
# default_format: auto
"#
    }

    fn create_catalog_dirs(root: &Path) -> Result<(), ProjectError> {
        let dirs = [
            "catalog/proprietary",
            "catalog/alternatives",
            "catalog/capabilities",
        ];

        for dir in dirs {
            std::fs::create_dir_all(root.join(dir))
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    /// Get the catalog root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .osb configuration directory
    pub fn osb_dir(&self) -> PathBuf {
        self.root.join(".osb")
    }

    /// Get the path for a new entity file
    pub fn entity_path(&self, prefix: EntityPrefix, id: &EntityId) -> PathBuf {
        self.root
            .join(Self::entity_directory(prefix))
            .join(format!("{}.osb.yaml", id))
    }

    /// Get the directory for a given entity prefix
    pub fn entity_directory(prefix: EntityPrefix) -> &'static str {
        match prefix {
            EntityPrefix::App => "catalog/proprietary",
            EntityPrefix::Oss => "catalog/alternatives",
            EntityPrefix::Cap => "catalog/capabilities",
        }
    }

    /// Get the absolute directory for a given entity prefix
    pub fn entity_dir(&self, prefix: EntityPrefix) -> PathBuf {
        self.root.join(Self::entity_directory(prefix))
    }

    /// Iterate all entity files of a given prefix type
    pub fn iter_entity_files(&self, prefix: EntityPrefix) -> impl Iterator<Item = PathBuf> {
        let dir = self.root.join(Self::entity_directory(prefix));
        walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().to_string_lossy().ends_with(".osb.yaml"))
            .map(|e| e.path().to_path_buf())
    }
}

/// Errors that can occur during catalog operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not an OSB catalog (searched from {searched_from:?}). Run 'osb init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("OSB catalog already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.osb_dir().exists());
        assert!(project.osb_dir().join("config.yaml").exists());
        assert!(project.root().join("catalog/proprietary").is_dir());
        assert!(project.root().join("catalog/alternatives").is_dir());
        assert!(project.root().join("catalog/capabilities").is_dir());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_project_discover_finds_osb_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_osb_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }
}
