//! `affected-packs affected` - Show which workspaces are affected by changes
//!
//! This command analyzes file changes (via git) and determines:
//! - Which changed files fall inside a watched directory
//! - Which workspaces directly contain them
//! - Which workspaces transitively depend on those, by location

use super::{LiveSources, OutputFormat};
use crate::core::context::ResolveContext;
use crate::core::error::PackResult;
use crate::core::resolver::{AffectedReport, Resolver};
use crate::sources::{ProjectSource, project_names};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Changed files listed in text output before the rest are counted.
const MAX_LISTED_FILES: usize = 20;

/// Run the affected command
pub fn run_affected(
  ctx: &ResolveContext,
  dirs: Vec<String>,
  since: Option<String>,
  graph_file: Option<PathBuf>,
  format: String,
) -> PackResult<()> {
  let output_format = OutputFormat::from_str(&format)?;
  let watched = ctx.watched_directories(&dirs)?;

  let sources = LiveSources::open(ctx, since.as_deref(), graph_file.as_deref())?;
  let report = Resolver::new(&sources.diff, &*sources.graph, &sources.projects).affected(&watched)?;

  print!("{}", render(&report, &sources.projects, output_format)?);
  Ok(())
}

/// Render the report in the requested format
pub(crate) fn render(report: &AffectedReport, projects: &dyn ProjectSource, format: OutputFormat) -> PackResult<String> {
  match format {
    OutputFormat::Text => Ok(render_text(report)),
    OutputFormat::Json => {
      let mut output = serde_json::to_value(report)?;
      output["summary"] = json!({
        "changed_files_count": report.changed_files.len(),
        "direct_count": report.direct.len(),
        "affected_count": report.affected.len(),
      });
      Ok(format!("{}\n", serde_json::to_string_pretty(&output)?))
    }
    OutputFormat::Names => Ok(
      project_names(projects, &report.affected)
        .into_iter()
        .flatten()
        .map(|name| format!("{}\n", name))
        .collect(),
    ),
  }
}

fn render_text(report: &AffectedReport) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Affected Analysis");
  let _ = writeln!(out, "=================");
  let _ = writeln!(out);

  let _ = writeln!(out, "Changed files: {}", report.changed_files.len());
  for file in report.changed_files.iter().take(MAX_LISTED_FILES) {
    let _ = writeln!(out, "  {}", file);
  }
  if report.changed_files.len() > MAX_LISTED_FILES {
    let _ = writeln!(out, "  ... and {} more", report.changed_files.len() - MAX_LISTED_FILES);
  }
  let _ = writeln!(out);

  let _ = writeln!(out, "Direct impact: {} workspaces", report.direct.len());
  for name in &report.direct {
    let _ = writeln!(out, "  📦 {}", name);
  }
  let _ = writeln!(out);

  let _ = writeln!(out, "Affected (direct + dependents): {} workspaces", report.affected.len());
  for location in &report.affected {
    let _ = writeln!(out, "  🎯 {}", location);
  }
  out
}
