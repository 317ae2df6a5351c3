//! CLI commands for affected-packs
//!
//! - **packs**: Resolve changed workspaces into CI packs
//! - **affected**: Show which workspaces are affected by changes
//!
//! All commands accept `&ResolveContext` so the config is loaded once.

pub mod affected;
pub mod packs;

pub use affected::run_affected;
pub use packs::run_packs;

use crate::core::context::ResolveContext;
use crate::core::error::{PackError, PackResult};
use crate::core::vcs::{GitDiff, SystemGit};
use crate::sources::{FsProjects, GraphFile, GraphSource, YarnWorkspaces};
use std::path::Path;

/// Output format shared by commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
  Text,
  Json,
  Names,
}

impl OutputFormat {
  pub(crate) fn from_str(s: &str) -> PackResult<Self> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "names" | "names-only" => Ok(Self::Names),
      _ => Err(PackError::with_help(
        format!("Unknown format '{}'", s),
        "Valid formats: json, text, names",
      )),
    }
  }
}

/// Live collaborators for one run.
pub(crate) struct LiveSources {
  pub diff: GitDiff,
  pub graph: Box<dyn GraphSource>,
  pub projects: FsProjects,
}

impl LiveSources {
  /// Git at the context root, the graph file when one is given (CLI or config),
  /// otherwise the configured workspace command.
  pub(crate) fn open(ctx: &ResolveContext, since: Option<&str>, graph_file: Option<&Path>) -> PackResult<Self> {
    let git = SystemGit::open(ctx.workspace_root())?;
    let diff = GitDiff::new(git, ctx.base_ref(since));

    let graph: Box<dyn GraphSource> = match ctx.graph_file(graph_file) {
      Some(path) => Box::new(GraphFile::new(path)),
      None => Box::new(YarnWorkspaces::new(ctx.workspace_root(), ctx.graph_command())),
    };

    Ok(Self {
      diff,
      graph,
      projects: FsProjects::new(ctx.workspace_root()),
    })
  }
}
