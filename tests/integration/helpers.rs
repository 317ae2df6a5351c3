//! Test helpers for integration tests

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Graph snapshot written next to the workspaces (git-ignored, so never part of a diff).
pub const GRAPH_FILE: &str = "workspaces.json";

/// A yarn monorepo with git history
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
  graph: Map<String, Value>,
}

impl TestWorkspace {
  /// Create a new monorepo with a root package.json
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    // Initialize git repo with main as default branch
    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("package.json"),
      r#"{
  "name": "monorepo",
  "private": true,
  "workspaces": ["library/*", "app/*"]
}
"#,
    )?;
    std::fs::write(path.join("README.md"), "# monorepo\n")?;
    std::fs::write(path.join(".gitignore"), format!("{}\n", GRAPH_FILE))?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial monorepo setup"])?;

    Ok(Self {
      _root: root,
      path,
      graph: Map::new(),
    })
  }

  /// Add a workspace at `location` and record it in the graph snapshot
  pub fn add_workspace(&mut self, location: &str, name: &str, deps: &[&str]) -> Result<PathBuf> {
    let workspace_path = self.path.join(location);
    std::fs::create_dir_all(workspace_path.join("src"))?;

    let manifest = json!({ "name": name, "version": "1.0.0" });
    std::fs::write(workspace_path.join("package.json"), serde_json::to_string_pretty(&manifest)?)?;
    std::fs::write(
      workspace_path.join("src/index.ts"),
      format!("export const name = \"{}\";\n", name),
    )?;

    self.graph.insert(
      name.to_string(),
      json!({
        "location": location,
        "workspaceDependencies": deps,
        "mismatchedWorkspaceDependencies": [],
      }),
    );
    self.write_graph()?;

    Ok(workspace_path)
  }

  /// Point an existing graph entry at a new location
  pub fn relocate(&mut self, name: &str, location: &str) -> Result<()> {
    if let Some(entry) = self.graph.get_mut(name) {
      entry["location"] = json!(location);
    }
    self.write_graph()
  }

  /// Write the graph the way `yarn --json workspaces info` prints it
  fn write_graph(&self) -> Result<()> {
    let data = serde_json::to_string(&self.graph)?;
    let document = json!({ "type": "log", "data": data });
    std::fs::write(self.path.join(GRAPH_FILE), serde_json::to_string(&document)?)?;
    Ok(())
  }

  /// Workspaces chained like a typical product monorepo:
  /// b → c → a, z → a, t → u, app-x → a, t
  pub fn with_sample_workspaces() -> Result<Self> {
    let mut ws = Self::new()?;
    ws.add_workspace("library/library-a", "@org/library-a", &[])?;
    ws.add_workspace("library/library-b", "@org/library-b", &["@org/library-c"])?;
    ws.add_workspace("library/library-c", "@org/library-c", &["@org/library-a"])?;
    ws.add_workspace("library/library-z", "@org/library-z", &["@org/library-a"])?;
    ws.add_workspace("library/library-u", "@org/library-u", &[])?;
    ws.add_workspace("library/library-t", "@org/library-t", &["@org/library-u"])?;
    ws.add_workspace("app/app-x", "@org/app-x", &["@org/library-a", "@org/library-t"])?;
    ws.commit("Add workspaces")?;

    // Baseline the diff is taken against
    git(&ws.path, &["branch", "origin/main"])?;
    Ok(ws)
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "--all"])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Write a file relative to the monorepo root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the affected-packs binary without checking its exit status
pub fn run_affected_packs_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  Command::new(env!("CARGO_BIN_EXE_affected-packs"))
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run affected-packs")
}

/// Run the affected-packs binary, failing on a non-zero exit
pub fn run_affected_packs(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_affected_packs_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "affected-packs command failed: affected-packs {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Parse stdout as JSON
pub fn stdout_json(output: &Output) -> Result<Value> {
  serde_json::from_slice(&output.stdout).context("stdout is not valid JSON")
}
