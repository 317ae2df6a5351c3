//! Filesystem-backed project descriptors (`<location>/package.json`)

use super::ProjectSource;
use crate::core::error::{PackResult, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor file read for every workspace root.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// package.json structure (only the field we care about)
#[derive(Debug, Deserialize)]
struct PackageManifest {
  #[serde(default)]
  name: Option<String>,
}

/// Reads descriptors relative to the monorepo root.
pub struct FsProjects {
  root: PathBuf,
}

impl FsProjects {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
    }
  }
}

impl ProjectSource for FsProjects {
  fn project_name(&self, location: &str) -> Option<String> {
    let manifest_path = self.root.join(location).join(DESCRIPTOR_FILE);

    let content = match fs::read_to_string(&manifest_path) {
      Ok(content) => content,
      Err(e) => {
        tracing::warn!(location, error = %e, "dropping project: descriptor unreadable");
        return None;
      }
    };

    match serde_json::from_str::<PackageManifest>(&content) {
      Ok(PackageManifest { name: Some(name) }) if !name.trim().is_empty() => Some(name),
      Ok(_) => {
        tracing::warn!(location, "dropping project: descriptor has no name");
        None
      }
      Err(e) => {
        tracing::warn!(location, error = %e, "dropping project: descriptor is not valid JSON");
        None
      }
    }
  }

  fn list_projects(&self, directory: &str) -> PackResult<Vec<String>> {
    let dir_path = self.root.join(directory);
    let entries = fs::read_dir(&dir_path).with_context(|| format!("Failed to list {}", dir_path.display()))?;

    let prefix = directory.trim_end_matches('/');
    let mut projects = Vec::new();
    for entry in entries {
      let entry = entry?;
      if !entry.file_type()?.is_dir() {
        continue;
      }
      match entry.file_name().into_string() {
        Ok(name) => projects.push(format!("{}/{}", prefix, name)),
        Err(name) => tracing::debug!(name = ?name, "skipping non UTF-8 directory name"),
      }
    }

    projects.sort();
    Ok(projects)
  }
}
