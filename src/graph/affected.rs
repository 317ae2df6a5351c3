//! Affected workspace analysis
//!
//! A change to workspace X affects X and every workspace that transitively
//! depends on X. Propagation follows dependents (incoming edges), never
//! dependencies.

use super::workspace_graph::WorkspaceGraph;
use std::collections::HashSet;

/// Transitive-dependents closure over the changed workspaces.
///
/// Iterative DFS with an explicit stack. A name is marked visited before it is
/// pushed, so every workspace is expanded at most once and cyclic graphs
/// terminate. Names unknown to the graph are excluded.
///
/// Output order is discovery order: each changed name, then its dependents
/// depth-first in name order.
pub fn resolve(changed: &[impl AsRef<str>], graph: &WorkspaceGraph) -> Vec<String> {
  let mut visited: HashSet<&str> = HashSet::new();
  let mut affected = Vec::new();

  for name in changed {
    let name = name.as_ref();
    if !graph.exists(name) {
      tracing::debug!(workspace = name, "changed workspace is not in the dependency graph");
      continue;
    }

    if !visited.insert(name) {
      continue;
    }

    let mut stack = vec![name];
    while let Some(current) = stack.pop() {
      affected.push(current.to_string());

      // Reverse so the alphabetically first dependent is expanded first.
      for dependent in graph.dependents_of(current).into_iter().rev() {
        if visited.insert(dependent) {
          stack.push(dependent);
        }
      }
    }
  }

  affected
}
