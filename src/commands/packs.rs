//! `affected-packs packs` - Group affected workspaces into CI packs
//!
//! The JSON form is the CI matrix: an array of `{ "name", "projects" }`.

use super::{LiveSources, OutputFormat};
use crate::core::context::ResolveContext;
use crate::core::error::PackResult;
use crate::core::resolver::Resolver;
use crate::pack::{NameFilter, ProjectPack};
use std::fmt::Write;
use std::path::PathBuf;

/// Run the packs command
pub fn run_packs(
  ctx: &ResolveContext,
  dirs: Vec<String>,
  defaults: Vec<String>,
  filter: Option<String>,
  since: Option<String>,
  graph_file: Option<PathBuf>,
  format: String,
) -> PackResult<()> {
  let output_format = OutputFormat::from_str(&format)?;
  let watched = ctx.watched_directories(&dirs)?;
  let defaults = ctx.default_directories(&defaults);
  let filter_pattern = ctx.filter_pattern(filter.as_deref());
  let app_filter = NameFilter::new(ctx.app_pattern())?;

  let sources = LiveSources::open(ctx, since.as_deref(), graph_file.as_deref())?;
  let packs = Resolver::new(&sources.diff, &*sources.graph, &sources.projects)
    .with_app_filter(app_filter)
    .resolve(&watched, defaults.as_deref(), &filter_pattern)?;

  print!("{}", render(&packs, output_format)?);
  Ok(())
}

/// Render packs in the requested format
pub(crate) fn render(packs: &[ProjectPack], format: OutputFormat) -> PackResult<String> {
  match format {
    OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(packs)?)),
    OutputFormat::Text => Ok(render_text(packs)),
    OutputFormat::Names => Ok(
      packs
        .iter()
        .flat_map(|pack| pack.projects.iter())
        .map(|name| format!("{}\n", name))
        .collect(),
    ),
  }
}

fn render_text(packs: &[ProjectPack]) -> String {
  let mut out = String::new();
  if packs.is_empty() {
    out.push_str("No packs\n");
    return out;
  }

  let total: usize = packs.iter().map(|p| p.projects.len()).sum();
  let _ = writeln!(out, "{} packs, {} projects", packs.len(), total);
  for pack in packs {
    let _ = writeln!(out);
    let _ = writeln!(out, "📦 {}", pack.name);
    for project in &pack.projects {
      let _ = writeln!(out, "  {}", project);
    }
  }
  out
}
