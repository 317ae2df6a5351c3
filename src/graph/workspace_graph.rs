//! Workspace dependency graph built from the yarn workspace mapping + petgraph
//!
//! ## Graph Structure
//!
//! - **Directed Graph**: `A → B` means "A declares B in its workspaceDependencies"
//! - **Nodes**: Workspaces (name + location)
//! - **Index**: name → node, for O(1) existence and location queries
//! - **Dependents**: incoming neighbors, so the reverse map is paid for once at
//!   construction (O(total edges)) instead of per query
//!
//! The graph is built fresh for every resolution and never mutated afterwards.

use petgraph::Direction;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One entry of the workspace mapping, validated at the source boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDescriptor {
  /// Directory relative to the repo root, e.g. `library/library-a`
  pub location: String,

  /// Workspace names this workspace depends on
  #[serde(default)]
  pub workspace_dependencies: Vec<String>,

  /// Reported by yarn, never consumed
  #[serde(default)]
  #[allow(dead_code)]
  pub mismatched_workspace_dependencies: Vec<String>,
}

/// Workspace name → descriptor. Ordered so graph construction is deterministic.
pub type WorkspaceMap = BTreeMap<String, WorkspaceDescriptor>;

/// A workspace node in the dependency graph.
#[derive(Debug, Clone)]
pub struct WorkspaceNode {
  pub name: String,
  pub location: String,
}

/// Lookup failures. Callers drop the offending name rather than propagating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
  UnknownWorkspace { name: String },
}

impl fmt::Display for GraphError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GraphError::UnknownWorkspace { name } => write!(f, "Workspace '{}' is not in the dependency graph", name),
    }
  }
}

impl std::error::Error for GraphError {}

/// Workspace dependency graph.
pub struct WorkspaceGraph {
  /// Nodes: WorkspaceNode, edges: dependent → dependency
  graph: DiGraph<WorkspaceNode, ()>,

  /// Index: workspace name → node index
  name_to_node: HashMap<String, NodeIndex>,
}

impl WorkspaceGraph {
  /// Build the graph from a workspace mapping.
  ///
  /// Declared dependencies on names missing from the mapping are ignored.
  pub fn new(workspaces: &WorkspaceMap) -> Self {
    let mut graph = DiGraph::with_capacity(workspaces.len(), 0);
    let mut name_to_node = HashMap::with_capacity(workspaces.len());

    for (name, descriptor) in workspaces {
      let node_idx = graph.add_node(WorkspaceNode {
        name: name.clone(),
        location: descriptor.location.clone(),
      });
      name_to_node.insert(name.clone(), node_idx);
    }

    for (name, descriptor) in workspaces {
      let from_idx = name_to_node[name];

      for dep in &descriptor.workspace_dependencies {
        match name_to_node.get(dep) {
          Some(to_idx) => {
            graph.update_edge(from_idx, *to_idx, ());
          }
          None => tracing::debug!(workspace = %name, dependency = %dep, "dependency is not a known workspace"),
        }
      }
    }

    let graph = Self { graph, name_to_node };

    for cycle in graph.find_cycles() {
      tracing::info!(cycle = %cycle.join(" → "), "workspace dependency cycle");
    }

    graph
  }

  /// Whether a workspace with this name exists.
  pub fn exists(&self, name: &str) -> bool {
    self.name_to_node.contains_key(name)
  }

  /// Location of a workspace.
  pub fn location_of(&self, name: &str) -> Result<&str, GraphError> {
    self
      .name_to_node
      .get(name)
      .map(|idx| self.graph[*idx].location.as_str())
      .ok_or_else(|| GraphError::UnknownWorkspace { name: name.to_string() })
  }

  /// Direct dependents of a workspace (everything that declares it as a dependency).
  ///
  /// Sorted by name. An unknown name has no dependents.
  pub fn dependents_of(&self, name: &str) -> Vec<&str> {
    let Some(node_idx) = self.name_to_node.get(name) else {
      return Vec::new();
    };

    let mut dependents: Vec<&str> = self
      .graph
      .neighbors_directed(*node_idx, Direction::Incoming)
      .map(|idx| self.graph[idx].name.as_str())
      .collect();

    dependents.sort_unstable();
    dependents.dedup();
    dependents
  }

  /// Number of workspaces in the graph.
  pub fn workspace_count(&self) -> usize {
    self.graph.node_count()
  }

  /// Detect dependency cycles using Tarjan's SCC algorithm.
  ///
  /// Returns strongly connected components with more than one member, each sorted.
  pub fn find_cycles(&self) -> Vec<Vec<String>> {
    algo::tarjan_scc(&self.graph)
      .into_iter()
      .filter(|component| component.len() > 1)
      .map(|component| {
        let mut names: Vec<String> = component.into_iter().map(|idx| self.graph[idx].name.clone()).collect();
        names.sort();
        names
      })
      .collect()
  }
}
