//! Unified run context - build once, pass everywhere
//!
//! `ResolveContext` holds the monorepo root and the loaded `packs.toml` (if any).
//! Commands merge their CLI arguments over it to get effective settings.

use crate::core::config::PacksConfig;
use crate::core::error::{ConfigError, PackError, PackResult};
use crate::core::vcs::DEFAULT_BASE;
use crate::pack::filter::MATCH_ALL;
use crate::pack::packer::DEFAULT_APP_PATTERN;
use std::path::{Path, PathBuf};

/// Shared run context
#[derive(Debug, Clone)]
pub struct ResolveContext {
  /// Monorepo root (absolute path)
  pub root: PathBuf,

  /// Loaded configuration, defaults when no file exists
  pub config: PacksConfig,
}

impl ResolveContext {
  /// Build context from a root directory.
  ///
  /// An explicit config path must exist; otherwise discovery is attempted and a
  /// missing file falls back to built-in defaults.
  pub fn build(root: &Path, config_path: Option<&Path>) -> PackResult<Self> {
    let config = match config_path {
      Some(path) => PacksConfig::load(&root.join(path))?,
      None => PacksConfig::discover(root)?.unwrap_or_default(),
    };

    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Get workspace root as Path reference (convenience)
  pub fn workspace_root(&self) -> &Path {
    &self.root
  }

  /// Watched directories: CLI wins over config; at least one is required.
  pub fn watched_directories(&self, cli: &[String]) -> PackResult<Vec<String>> {
    let directories: Vec<String> = if cli.is_empty() {
      self.config.watch.directories.clone()
    } else {
      cli.to_vec()
    };

    let directories: Vec<String> = directories
      .into_iter()
      .map(|d| d.trim_end_matches('/').to_string())
      .filter(|d| !d.is_empty())
      .collect();

    if directories.is_empty() {
      return Err(PackError::Config(ConfigError::NoWatchedDirectories));
    }
    Ok(directories)
  }

  /// Fallback category directories, `None` when neither CLI nor config set any.
  pub fn default_directories(&self, cli: &[String]) -> Option<Vec<String>> {
    if cli.is_empty() {
      self.config.watch.defaults.clone()
    } else {
      Some(cli.to_vec())
    }
  }

  pub fn filter_pattern(&self, cli: Option<&str>) -> String {
    cli
      .or(self.config.watch.filter.as_deref())
      .unwrap_or(MATCH_ALL)
      .to_string()
  }

  pub fn app_pattern(&self) -> &str {
    self.config.watch.app_pattern.as_deref().unwrap_or(DEFAULT_APP_PATTERN)
  }

  pub fn base_ref(&self, cli: Option<&str>) -> String {
    cli.or(self.config.watch.base.as_deref()).unwrap_or(DEFAULT_BASE).to_string()
  }

  /// Graph snapshot file, resolved against the root. CLI wins over config.
  pub fn graph_file(&self, cli: Option<&Path>) -> Option<PathBuf> {
    cli
      .map(Path::to_path_buf)
      .or_else(|| self.config.graph.file.clone())
      .map(|path| self.root.join(path))
  }

  pub fn graph_command(&self) -> Vec<String> {
    self.config.graph.command.clone().unwrap_or_default()
  }
}
