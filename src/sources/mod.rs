//! Collaborator traits defining the external boundaries of a resolution.
//!
//! Each trait is a narrow, synchronous view of one external system:
//! - [`DiffSource`]: the numstat diff summary (git)
//! - [`GraphSource`]: the workspace dependency mapping (yarn)
//! - [`ProjectSource`]: per-workspace `package.json` files and category listings
//!
//! Live implementations live beside the traits (`yarn`, `project`) and in
//! `core::vcs`. Tests substitute in-memory fakes.

pub mod project;
pub mod yarn;

use crate::core::error::PackResult;
use crate::graph::WorkspaceMap;
use rayon::prelude::*;

pub use project::FsProjects;
pub use yarn::{GraphFile, YarnWorkspaces};

/// Produces raw `insertions<TAB>deletions<TAB>path` text.
pub trait DiffSource {
  fn fetch(&self) -> PackResult<String>;
}

/// Produces the workspace name → descriptor mapping.
pub trait GraphSource {
  fn fetch(&self) -> PackResult<WorkspaceMap>;
}

/// Reads project descriptors and lists category directories.
pub trait ProjectSource: Send + Sync {
  /// Name declared by the descriptor at `location`, or `None` when it is
  /// missing, unparsable or nameless.
  fn project_name(&self, location: &str) -> Option<String>;

  /// Immediate subdirectories of `directory`, as `directory/child`.
  fn list_projects(&self, directory: &str) -> PackResult<Vec<String>>;
}

/// Resolve names for many locations at once.
///
/// Reads run in parallel; the result is index-aligned with `locations`.
pub fn project_names<S: AsRef<str> + Sync>(source: &dyn ProjectSource, locations: &[S]) -> Vec<Option<String>> {
  locations
    .par_iter()
    .map(|location| source.project_name(location.as_ref()))
    .collect()
}
