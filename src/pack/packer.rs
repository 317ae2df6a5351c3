//! Pack assembly
//!
//! Application workspaces are built on their own; library workspaces are
//! batched into chunks whose size depends on how many libraries are affected:
//!
//! | libraries `n` | chunk size     |
//! |---------------|----------------|
//! | `n < 3`       | `n`            |
//! | `3..=10`      | 10             |
//! | `n > 10`      | `ceil(n / 2)`  |

use super::filter::NameFilter;
use crate::sources::{ProjectSource, project_names};
use serde::Serialize;
use std::collections::HashSet;

/// Prefix of multi-member library pack names.
pub const PACK_PREFIX: &str = "Project pack";

/// Default role pattern for application workspaces.
pub const DEFAULT_APP_PATTERN: &str = "app/**";

/// A named group of workspaces processed together by one CI job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPack {
  pub name: String,
  pub projects: Vec<String>,
}

impl ProjectPack {
  fn single(name: String) -> Self {
    Self {
      name: name.clone(),
      projects: vec![name],
    }
  }
}

/// Chunk size for `n` library workspaces.
pub fn chunk_size(n: usize) -> usize {
  if n < 3 {
    n
  } else if n > 10 {
    n.div_ceil(2)
  } else {
    10
  }
}

/// Build packs from already-resolved names.
///
/// Apps come first in encounter order, one pack each. Libraries are sliced in
/// encounter order, then each chunk is sorted. A one-member chunk is named
/// after its member, larger chunks `Project pack: <chunk index>`.
pub fn pack_names(apps: Vec<String>, libraries: Vec<String>) -> Vec<ProjectPack> {
  let mut packs: Vec<ProjectPack> = apps.into_iter().map(ProjectPack::single).collect();

  if libraries.is_empty() {
    return packs;
  }

  let size = chunk_size(libraries.len());
  for (index, chunk) in libraries.chunks(size).enumerate() {
    let mut projects = chunk.to_vec();
    projects.sort();

    let name = match projects.as_slice() {
      [only] => only.clone(),
      _ => format!("{}: {}", PACK_PREFIX, index),
    };
    packs.push(ProjectPack { name, projects });
  }

  packs
}

/// Splits workspace locations by role and turns them into packs.
pub struct Packer<'a> {
  app_filter: NameFilter,
  projects: &'a dyn ProjectSource,
}

/// Role filter for [`DEFAULT_APP_PATTERN`].
pub fn default_app_filter() -> NameFilter {
  NameFilter::new(DEFAULT_APP_PATTERN).unwrap()
}

impl<'a> Packer<'a> {
  pub fn new(app_filter: NameFilter, projects: &'a dyn ProjectSource) -> Self {
    Self { app_filter, projects }
  }

  /// Whether a location belongs to the application category.
  pub fn is_app(&self, location: &str) -> bool {
    self.app_filter.matches(location)
  }

  /// Pack workspace locations.
  ///
  /// Locations whose descriptor yields no name are dropped before chunk sizing.
  /// A name is emitted at most once across all packs.
  pub fn pack<S: AsRef<str> + Sync>(&self, locations: &[S]) -> Vec<ProjectPack> {
    let (app_locations, library_locations): (Vec<&str>, Vec<&str>) =
      locations.iter().map(AsRef::as_ref).partition(|location| self.is_app(location));

    let mut seen = HashSet::new();
    let mut named = |locations: &[&str]| -> Vec<String> {
      project_names(self.projects, locations)
        .into_iter()
        .flatten()
        .filter(|name| seen.insert(name.clone()))
        .collect()
    };

    let apps = named(&app_locations);
    let libraries = named(&library_locations);

    tracing::debug!(apps = apps.len(), libraries = libraries.len(), "packing workspaces");
    pack_names(apps, libraries)
  }
}
