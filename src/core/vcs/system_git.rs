//! System git backend
//!
//! Runs the `git` binary with an isolated environment. Only what change
//! detection needs is exposed: locating the work tree and the numstat diff.

use crate::core::error::{PackError, PackResult, ResultExt, SourceError};
use crate::sources::DiffSource;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git
pub struct SystemGit {
  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  pub fn open(path: &Path) -> PackResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(PackError::Source(SourceError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(PackError::Source(SourceError::CommandFailed {
        command: "git rev-parse --show-toplevel".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(Self {
      work_tree: PathBuf::from(stdout.trim()),
    })
  }

  /// `git diff <base> --numstat`: working tree (including uncommitted edits)
  /// against `base`, paths relative to the work tree root.
  pub fn diff_numstat(&self, base: &str) -> PackResult<String> {
    let output = self
      .git_cmd()
      .args(["diff", base, "--numstat", "--"])
      .output()
      .context("Failed to execute git diff")?;

    if !output.status.success() {
      return Err(PackError::Source(SourceError::CommandFailed {
        command: format!("git diff {} --numstat", base),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    tracing::debug!(base, lines = stdout.lines().count(), "read numstat diff");
    Ok(stdout)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Runs from the work tree root so diff paths are root-relative
  /// - Clears environment variables, whitelisting only PATH and HOME
  /// - Keeps non-ASCII paths unescaped
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.work_tree);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false");
    // Rename notation depends on rename detection being on.
    cmd.arg("-c").arg("diff.renames=true");

    cmd
  }
}

/// Live [`DiffSource`]: the numstat diff against a fixed base ref.
pub struct GitDiff {
  git: SystemGit,
  base: String,
}

impl GitDiff {
  pub fn new(git: SystemGit, base: impl Into<String>) -> Self {
    Self { git, base: base.into() }
  }
}

impl DiffSource for GitDiff {
  fn fetch(&self) -> PackResult<String> {
    self.git.diff_numstat(&self.base)
  }
}
