//! Glob inclusion filter
//!
//! Patterns follow minimatch conventions: `*` stays inside one path segment,
//! `**` spans segments.

use crate::core::error::{ConfigError, PackError, PackResult};
use globset::{GlobBuilder, GlobMatcher};

/// Pattern matching everything.
pub const MATCH_ALL: &str = "**";

/// A compiled inclusion pattern.
#[derive(Debug, Clone)]
pub struct NameFilter {
  matcher: GlobMatcher,
}

impl NameFilter {
  /// Compile a glob pattern.
  pub fn new(pattern: &str) -> PackResult<Self> {
    let glob = GlobBuilder::new(pattern).literal_separator(true).build().map_err(|e| {
      PackError::Config(ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.kind().to_string(),
      })
    })?;
    Ok(Self {
      matcher: glob.compile_matcher(),
    })
  }

  pub fn matches(&self, name: &str) -> bool {
    self.matcher.is_match(name)
  }

  /// Keep the names matching this pattern, preserving input order.
  pub fn apply<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
    names
      .iter()
      .map(AsRef::as_ref)
      .filter(|name| self.matches(name))
      .map(str::to_string)
      .collect()
  }

  pub fn as_str(&self) -> &str {
    self.matcher.glob().glob()
  }
}
