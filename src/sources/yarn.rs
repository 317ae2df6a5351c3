//! Workspace mapping sources
//!
//! `yarn --json workspaces info` prints a wrapper whose `data` field holds the
//! mapping as a JSON-encoded string:
//!
//! ```json
//! {"type":"log","data":"{\"@org/a\":{\"location\":\"library/a\",\"workspaceDependencies\":[],...}}"}
//! ```
//!
//! Both sources accept that wrapper, a wrapper whose `data` is already an
//! object, or the bare mapping.

use super::GraphSource;
use crate::core::error::{PackError, PackResult, SourceError};
use crate::graph::{WorkspaceDescriptor, WorkspaceMap};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default command producing the workspace mapping.
pub const DEFAULT_COMMAND: [&str; 4] = ["yarn", "--json", "workspaces", "info"];

/// Runs the workspace manager and decodes its output.
pub struct YarnWorkspaces {
  root: PathBuf,
  command: Vec<String>,
}

impl YarnWorkspaces {
  /// `command` is program followed by its arguments; empty means the default.
  pub fn new(root: &Path, command: Vec<String>) -> Self {
    let command = if command.is_empty() {
      DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect()
    } else {
      command
    };
    Self {
      root: root.to_path_buf(),
      command,
    }
  }

  fn display_command(&self) -> String {
    self.command.join(" ")
  }
}

impl GraphSource for YarnWorkspaces {
  fn fetch(&self) -> PackResult<WorkspaceMap> {
    let (program, args) = self
      .command
      .split_first()
      .ok_or_else(|| PackError::message("Workspace graph command is empty"))?;

    tracing::debug!(command = %self.display_command(), "fetching workspace graph");

    let output = Command::new(program)
      .args(args)
      .current_dir(&self.root)
      .output()
      .map_err(|e| {
        PackError::Source(SourceError::CommandFailed {
          command: self.display_command(),
          stderr: e.to_string(),
        })
      })?;

    if !output.status.success() {
      return Err(PackError::Source(SourceError::CommandFailed {
        command: self.display_command(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }

    decode_document(&String::from_utf8_lossy(&output.stdout), &self.display_command())
  }
}

/// Reads a snapshot of the workspace document from disk.
pub struct GraphFile {
  path: PathBuf,
}

impl GraphFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl GraphSource for GraphFile {
  fn fetch(&self) -> PackResult<WorkspaceMap> {
    let source = self.path.display().to_string();
    let content = std::fs::read_to_string(&self.path).map_err(|e| {
      PackError::Source(SourceError::MalformedDocument {
        source: source.clone(),
        reason: e.to_string(),
      })
    })?;
    decode_document(&content, &source)
  }
}

/// Decode a workspace document into typed descriptors.
///
/// A top-level document that is not JSON, or whose mapping is not an object,
/// is fatal. Individual entries that do not fit a descriptor are skipped.
pub fn decode_document(raw: &str, source: &str) -> PackResult<WorkspaceMap> {
  let malformed = |reason: String| {
    PackError::Source(SourceError::MalformedDocument {
      source: source.to_string(),
      reason,
    })
  };

  let document: Value = serde_json::from_str(raw.trim()).map_err(|e| malformed(e.to_string()))?;

  let mapping = match document {
    Value::Object(mut wrapper) if is_wrapper(&wrapper) => match wrapper.remove("data") {
      Some(Value::String(encoded)) => {
        serde_json::from_str(&encoded).map_err(|e| malformed(format!("`data` is not valid JSON: {}", e)))?
      }
      Some(value @ Value::Object(_)) => value,
      _ => return Err(malformed("`data` must be a JSON string or object".to_string())),
    },
    other => other,
  };

  let Value::Object(entries) = mapping else {
    return Err(malformed("workspace mapping must be a JSON object".to_string()));
  };

  let mut workspaces = WorkspaceMap::new();
  for (name, entry) in entries {
    match serde_json::from_value::<WorkspaceDescriptor>(entry) {
      Ok(descriptor) => {
        workspaces.insert(name, descriptor);
      }
      Err(e) => tracing::warn!(workspace = %name, error = %e, "skipping malformed workspace entry"),
    }
  }

  tracing::debug!(count = workspaces.len(), source, "decoded workspace graph");
  Ok(workspaces)
}

/// yarn's `{"type": "<kind>", "data": ...}` envelope. Workspaces may be named
/// `type` or `data`, so both keys and a string `type` are required.
fn is_wrapper(document: &Map<String, Value>) -> bool {
  matches!(document.get("type"), Some(Value::String(_))) && document.contains_key("data")
}
