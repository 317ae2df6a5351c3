//! Integration tests for `affected-packs affected`

use crate::helpers::{GRAPH_FILE, TestWorkspace, run_affected_packs, stdout_json};
use anyhow::Result;

fn affected(ws: &TestWorkspace, format: &str) -> Result<String> {
  let output = run_affected_packs(
    &ws.path,
    &[
      "affected",
      "--dir",
      "library",
      "--dir",
      "app",
      "--graph-file",
      GRAPH_FILE,
      "--format",
      format,
    ],
  )?;
  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[test]
fn test_affected_text_report() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;
  ws.write_file("library/library-c/src/index.ts", "export const c = 2;\n")?;
  ws.commit("Change library-c")?;

  let stdout = affected(&ws, "text")?;
  assert!(stdout.contains("Changed files: 1"), "got: {}", stdout);
  assert!(stdout.contains("library/library-c/src/index.ts"));
  assert!(stdout.contains("📦 @org/library-c"));
  assert!(stdout.contains("🎯 library/library-b"), "library-b depends on library-c");
  assert!(!stdout.contains("🎯 app/app-x"), "app-x does not depend on library-c");

  Ok(())
}

#[test]
fn test_affected_no_changes() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;

  let stdout = affected(&ws, "text")?;
  assert!(
    stdout.contains("Changed files: 0") && stdout.contains("Direct impact: 0"),
    "Should indicate no changes, got: {}",
    stdout
  );

  Ok(())
}

#[test]
fn test_affected_json_output() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;
  ws.write_file("library/library-u/README.md", "# library-u\n")?;
  ws.write_file("docs/guide.md", "# Guide\n")?;
  ws.commit("Document library-u")?;

  let output = run_affected_packs(
    &ws.path,
    &["affected", "--dir", "library", "--graph-file", GRAPH_FILE, "--format", "json"],
  )?;
  let json = stdout_json(&output)?;

  assert_eq!(json["changed_files"], serde_json::json!(["library/library-u/README.md"]));
  assert_eq!(json["direct"], serde_json::json!(["@org/library-u"]));
  assert_eq!(
    json["affected"],
    serde_json::json!(["library/library-u", "library/library-t", "app/app-x"])
  );
  assert_eq!(json["summary"]["affected_count"], 3);

  Ok(())
}

#[test]
fn test_affected_names_output() -> Result<()> {
  let ws = TestWorkspace::with_sample_workspaces()?;
  ws.write_file("library/library-a/package.json", r#"{ "name": "@org/library-a", "version": "1.1.0" }"#)?;
  ws.commit("Bump library-a")?;

  let stdout = affected(&ws, "names")?;
  let mut names: Vec<&str> = stdout.lines().collect();
  names.sort();
  assert_eq!(
    names,
    vec!["@org/app-x", "@org/library-a", "@org/library-b", "@org/library-c", "@org/library-z"]
  );

  Ok(())
}
