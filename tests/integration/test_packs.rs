//! Integration tests for `affected-packs packs`

use crate::helpers::{GRAPH_FILE, TestWorkspace, git, run_affected_packs, run_affected_packs_raw, stdout_json};
use anyhow::Result;
use serde_json::{Value, json};

const WATCH: [&str; 4] = ["--dir", "library", "--dir", "app"];

fn packs(ws: &TestWorkspace, extra: &[&str]) -> Result<Value> {
  let mut args = vec!["packs", "--graph-file", GRAPH_FILE];
  args.extend(WATCH);
  args.extend(extra);
  stdout_json(&run_affected_packs(&ws.path, &args)?)
}

#[test]
fn test_library_change_packs_its_dependents() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;
  ws.write_file("library/library-a/src/index.ts", "export const changed = true;\n")?;
  ws.commit("Change library-a")?;

  assert_eq!(
    packs(&ws, &[])?,
    json!([
      { "name": "@org/app-x", "projects": ["@org/app-x"] },
      {
        "name": "Project pack: 0",
        "projects": ["@org/library-a", "@org/library-b", "@org/library-c", "@org/library-z"]
      }
    ])
  );

  Ok(())
}

#[test]
fn test_filter_restricts_categories() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;
  ws.write_file("library/library-a/src/index.ts", "export const changed = true;\n")?;
  ws.commit("Change library-a")?;

  let libraries = packs(&ws, &["--filter", "library/**"])?;
  assert_eq!(libraries.as_array().map(Vec::len), Some(1));
  assert_eq!(libraries[0]["name"], "Project pack: 0");

  let apps = packs(&ws, &["--filter", "app/**"])?;
  assert_eq!(apps, json!([{ "name": "@org/app-x", "projects": ["@org/app-x"] }]));

  assert_eq!(packs(&ws, &["--filter", "tools/**"])?, json!([]));

  Ok(())
}

#[test]
fn test_uncommitted_changes_count() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;
  ws.write_file("library/library-u/src/index.ts", "export const dirty = true;\n")?;

  assert_eq!(
    packs(&ws, &[])?,
    json!([
      { "name": "@org/app-x", "projects": ["@org/app-x"] },
      { "name": "Project pack: 0", "projects": ["@org/library-t", "@org/library-u"] }
    ])
  );

  Ok(())
}

#[test]
fn test_renamed_workspace_uses_new_location() -> Result<()> {
  let mut ws = TestWorkspace::with_sample_workspaces()?;
  git(&ws.path, &["mv", "library/library-z", "library/library-y"])?;
  ws.relocate("@org/library-z", "library/library-y")?;
  ws.commit("Move library-z")?;

  assert_eq!(
    packs(&ws, &[])?,
    json!([{ "name": "@org/library-z", "projects": ["@org/library-z"] }])
  );

  Ok(())
}

#[test]
fn test_fallback_to_default_directories() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;
  ws.write_file("README.md", "# monorepo\n\nDocs only.\n")?;
  ws.commit("Docs")?;

  let apps = packs(&ws, &["--default", "app"])?;
  assert_eq!(apps, json!([{ "name": "@org/app-x", "projects": ["@org/app-x"] }]));

  // Without defaults every watched directory is listed: 6 libraries share one pack.
  let all = packs(&ws, &[])?;
  assert_eq!(all[0]["name"], "@org/app-x");
  assert_eq!(all[1]["projects"].as_array().map(Vec::len), Some(6));

  Ok(())
}

#[test]
fn test_many_libraries_split_in_two() -> Result<()> {
  let mut ws = TestWorkspace::new()?;
  ws.add_workspace("library/core", "@org/core", &[])?;
  for i in 0..11 {
    let location = format!("library/feature-{:02}", i);
    let name = format!("@org/feature-{:02}", i);
    ws.add_workspace(&location, &name, &["@org/core"])?;
  }
  ws.commit("Add libraries")?;
  git(&ws.path, &["branch", "origin/main"])?;

  ws.write_file("library/core/src/index.ts", "export const v = 2;\n")?;
  ws.commit("Change core")?;

  let result = packs(&ws, &["--dir", "library"])?;
  let sizes: Vec<usize> = result
    .as_array()
    .into_iter()
    .flatten()
    .filter_map(|pack| pack["projects"].as_array().map(Vec::len))
    .collect();
  assert_eq!(sizes, vec![6, 6]);
  assert_eq!(result[1]["name"], "Project pack: 1");

  Ok(())
}

#[test]
fn test_config_file_and_names_format() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;
  ws.write_file(
    "packs.toml",
    r#"[watch]
directories = ["library", "app"]
filter = "library/**"

[graph]
file = "workspaces.json"
"#,
  )?;
  ws.write_file("library/library-t/src/index.ts", "export const t = 2;\n")?;
  ws.commit("Change library-t")?;

  let output = run_affected_packs(&ws.path, &["packs", "--format", "names"])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout), "@org/library-t\n");

  Ok(())
}

#[test]
fn test_missing_watched_directories_is_user_error() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;

  let output = run_affected_packs_raw(&ws.path, &["packs", "--graph-file", GRAPH_FILE])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("No watched directories"));
  assert!(output.stdout.is_empty());

  Ok(())
}

#[test]
fn test_missing_base_ref_is_system_error() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;

  let output = run_affected_packs_raw(
    &ws.path,
    &["packs", "--dir", "library", "--graph-file", GRAPH_FILE, "--since", "origin/nope"],
  )?;
  assert_eq!(output.status.code(), Some(2));
  assert!(output.stdout.is_empty());

  Ok(())
}
