//! Graph-aware workspace analysis
//!
//! Built on the yarn workspace mapping + petgraph. The mapping is decoded into
//! typed descriptors at the source boundary; everything here is pure.

pub mod affected;
pub mod workspace_graph;

pub use workspace_graph::{WorkspaceDescriptor, WorkspaceGraph, WorkspaceMap};
