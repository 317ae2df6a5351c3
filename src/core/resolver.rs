//! Affected-pack resolution
//!
//! Wires the collaborators together:
//!
//! ```text
//! diff ─▶ parse ─▶ rename ─▶ watched? ─▶ root_of ─▶ name
//!                                                    │
//!        packs ◀─ pack ◀─ filter ◀─ location ◀─ closure (graph)
//! ```
//!
//! When nothing in a watched directory changed, the category directories are
//! listed instead and their workspaces go through filter and pack unchanged.

use crate::changes::{self, ChangeRecord};
use crate::core::error::PackResult;
use crate::graph::{WorkspaceGraph, affected};
use crate::pack::packer::default_app_filter;
use crate::pack::{NameFilter, Packer, ProjectPack};
use crate::sources::{DiffSource, GraphSource, ProjectSource, project_names};
use serde::Serialize;
use std::collections::HashSet;

/// Intermediate result of change analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AffectedReport {
  /// Changed paths (rename-resolved) inside a watched directory
  pub changed_files: Vec<String>,
  /// Project names of the workspaces containing those paths
  pub direct: Vec<String>,
  /// Locations of the direct workspaces and all their transitive dependents
  pub affected: Vec<String>,
}

/// Resolves watched directories into CI packs.
pub struct Resolver<'a> {
  diff: &'a dyn DiffSource,
  graph: &'a dyn GraphSource,
  projects: &'a dyn ProjectSource,
  app_filter: NameFilter,
}

impl<'a> Resolver<'a> {
  pub fn new(diff: &'a dyn DiffSource, graph: &'a dyn GraphSource, projects: &'a dyn ProjectSource) -> Self {
    Self {
      diff,
      graph,
      projects,
      app_filter: default_app_filter(),
    }
  }

  /// Override which locations count as applications.
  pub fn with_app_filter(mut self, app_filter: NameFilter) -> Self {
    self.app_filter = app_filter;
    self
  }

  /// Full resolution: affected workspaces (or the fallback listing), filtered
  /// by `filter_pattern` and packed.
  ///
  /// `defaults` names the category directories listed when no watched workspace
  /// changed. `None` lists the watched directories themselves.
  pub fn resolve<S: AsRef<str>>(
    &self,
    watched: &[S],
    defaults: Option<&[String]>,
    filter_pattern: &str,
  ) -> PackResult<Vec<ProjectPack>> {
    let filter = NameFilter::new(filter_pattern)?;
    let report = self.affected(watched)?;

    let locations = if report.affected.is_empty() {
      self.fallback(watched, defaults)?
    } else {
      report.affected
    };

    let selected = filter.apply(&locations);
    tracing::info!(
      candidates = locations.len(),
      selected = selected.len(),
      filter = filter.as_str(),
      "filtered workspace locations"
    );

    Ok(Packer::new(self.app_filter.clone(), self.projects).pack(&selected))
  }

  /// Change analysis without the fallback or packing steps.
  ///
  /// The graph is only fetched when at least one change lands in a watched
  /// workspace with a readable descriptor.
  pub fn affected<S: AsRef<str>>(&self, watched: &[S]) -> PackResult<AffectedReport> {
    let watch_filters = watch_filters(watched)?;

    let raw = self.diff.fetch()?;
    let records: Vec<ChangeRecord> = changes::parse(&raw)
      .iter()
      .map(ChangeRecord::renamed)
      .filter(|record| watch_filters.iter().any(|f| f.matches(&record.path)))
      .collect();
    tracing::info!(changes = records.len(), "changes inside watched directories");

    let locations = dedup(records.iter().map(changes::root_of));
    let direct = dedup(project_names(self.projects, &locations).into_iter().flatten());
    let changed_files = records.into_iter().map(|record| record.path).collect();

    if direct.is_empty() {
      tracing::debug!("no watched workspace changed, skipping workspace graph fetch");
      return Ok(AffectedReport {
        changed_files,
        direct,
        affected: Vec::new(),
      });
    }

    let workspaces = self.graph.fetch()?;
    let graph = WorkspaceGraph::new(&workspaces);
    tracing::debug!(workspaces = graph.workspace_count(), "built workspace graph");

    let affected = dedup(
      affected::resolve(&direct, &graph)
        .iter()
        .filter_map(|name| match graph.location_of(name) {
          Ok(location) => Some(location.to_string()),
          Err(e) => {
            tracing::debug!(error = %e, "dropping affected workspace");
            None
          }
        }),
    );
    tracing::info!(direct = direct.len(), affected = affected.len(), "resolved affected workspaces");

    Ok(AffectedReport {
      changed_files,
      direct,
      affected,
    })
  }

  fn fallback<S: AsRef<str>>(&self, watched: &[S], defaults: Option<&[String]>) -> PackResult<Vec<String>> {
    let directories: Vec<&str> = match defaults {
      Some(defaults) => defaults.iter().map(String::as_str).collect(),
      None => watched.iter().map(AsRef::as_ref).collect(),
    };
    tracing::info!(?directories, "no watched workspace changed, listing default directories");

    let mut locations = Vec::new();
    for directory in directories {
      locations.extend(self.projects.list_projects(directory)?);
    }
    Ok(dedup(locations))
  }
}

/// One `<dir>/**/*` matcher per watched directory.
fn watch_filters<S: AsRef<str>>(watched: &[S]) -> PackResult<Vec<NameFilter>> {
  watched
    .iter()
    .map(|dir| NameFilter::new(&format!("{}/**/*", dir.as_ref().trim_end_matches('/'))))
    .collect()
}

/// Drop repeats, keeping first occurrences in order.
fn dedup(items: impl IntoIterator<Item = String>) -> Vec<String> {
  let mut seen = HashSet::new();
  items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
