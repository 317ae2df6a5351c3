//! Numstat parsing
//!
//! Each line of `git diff --numstat` is `insertions<TAB>deletions<TAB>path`.
//! The counters may be `-` for binary files; they are never interpreted.

use regex::Regex;
use std::sync::LazyLock;

/// `prefix{old => new}suffix` as printed by git for renames inside a common directory.
static RENAME_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?P<path>.*)\{(?P<old>[^{}]*)\s=>\s(?P<new>[^{}]*)\}").unwrap());

/// One changed path from the diff summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
  pub path: String,
}

impl ChangeRecord {
  /// Copy of this record with rename notation resolved to the new side.
  pub fn renamed(&self) -> Self {
    Self {
      path: resolve_rename(&self.path),
    }
  }
}

/// Parse raw numstat text into change records.
///
/// Empty lines are dropped. Lines with fewer than three tab-separated fields
/// carry no path and are skipped.
pub fn parse(raw: &str) -> Vec<ChangeRecord> {
  raw
    .lines()
    .filter(|line| !line.is_empty())
    .filter_map(|line| {
      let mut fields = line.split('\t');
      let _insertions = fields.next()?;
      let _deletions = fields.next()?;
      let path = fields.next()?;
      if path.is_empty() {
        tracing::debug!(line, "skipping numstat line without a path");
        return None;
      }
      Some(ChangeRecord { path: path.to_string() })
    })
    .collect()
}

/// Resolve git rename notation to the post-rename path.
///
/// `library/{old-name => new-name}/src/index.ts` becomes `library/new-name`:
/// the directory prefix joined with the trimmed new name. Anything after the
/// closing brace is discarded since only the workspace root matters downstream.
///
/// Strings that mention `=>` but do not decompose into prefix, old and new parts
/// are returned unchanged.
pub fn resolve_rename(path: &str) -> String {
  if !path.contains("=>") {
    return path.to_string();
  }

  let Some(captures) = RENAME_PATTERN.captures(path) else {
    tracing::debug!(path, "rename notation did not match, keeping literal path");
    return path.to_string();
  };

  match (captures.name("path"), captures.name("old"), captures.name("new")) {
    (Some(prefix), Some(_old), Some(new)) => format!("{}{}", prefix.as_str(), new.as_str().trim()),
    _ => path.to_string(),
  }
}
