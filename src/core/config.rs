use crate::core::error::{ConfigError, PackError, PackResult, ResultExt};
use crate::pack::NameFilter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for affected-packs
/// Searched in order: packs.toml, .packs.toml, .config/packs.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PacksConfig {
  #[serde(default)]
  pub watch: WatchConfig,
  #[serde(default)]
  pub graph: GraphConfig,
}

/// Which parts of the monorepo are analyzed and how results are shaped
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchConfig {
  /// Category directories whose changes are tracked (e.g. ["library", "app"])
  #[serde(default)]
  pub directories: Vec<String>,

  /// Category directories listed when no change hits a watched directory.
  /// Unset means the watched directories themselves.
  #[serde(default)]
  pub defaults: Option<Vec<String>>,

  /// Inclusion pattern over workspace locations (default: "**")
  #[serde(default)]
  pub filter: Option<String>,

  /// Locations matching this pattern become single-workspace packs (default: "app/**")
  #[serde(default)]
  pub app_pattern: Option<String>,

  /// Git ref the working tree is compared against (default: "origin/main")
  #[serde(default)]
  pub base: Option<String>,
}

/// Where the workspace dependency mapping comes from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphConfig {
  /// Program and arguments printing the mapping (default: yarn --json workspaces info)
  #[serde(default)]
  pub command: Option<Vec<String>>,

  /// Read the mapping from this file instead of running a command
  #[serde(default)]
  pub file: Option<PathBuf>,
}

impl PacksConfig {
  /// Find config file in search order: packs.toml, .packs.toml, .config/packs.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("packs.toml"),
      path.join(".packs.toml"),
      path.join(".config").join("packs.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config discovered under `path`. No config file is not an error.
  pub fn discover(path: &Path) -> PackResult<Option<Self>> {
    match Self::find_config_path(path) {
      Some(config_path) => Self::load(&config_path).map(Some),
      None => Ok(None),
    }
  }

  /// Load config from an explicit file
  pub fn load(config_path: &Path) -> PackResult<Self> {
    if !config_path.exists() {
      return Err(PackError::Config(ConfigError::NotFound {
        path: config_path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
  }

  /// Parse and validate TOML content
  pub fn parse(content: &str) -> PackResult<Self> {
    let config: PacksConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate patterns and field values
  pub fn validate(&self) -> PackResult<()> {
    for pattern in [&self.watch.filter, &self.watch.app_pattern].into_iter().flatten() {
      NameFilter::new(pattern)?;
    }

    if self.watch.directories.iter().any(|d| d.trim().is_empty()) {
      return Err(PackError::Config(ConfigError::InvalidField {
        field: "watch.directories".to_string(),
        reason: "directory names must not be empty".to_string(),
      }));
    }

    if let Some(ref command) = self.graph.command
      && command.is_empty()
    {
      return Err(PackError::Config(ConfigError::InvalidField {
        field: "graph.command".to_string(),
        reason: "command must name a program".to_string(),
      }));
    }

    if let Some(ref base) = self.watch.base
      && base.trim().is_empty()
    {
      return Err(PackError::Config(ConfigError::InvalidField {
        field: "watch.base".to_string(),
        reason: "base ref must not be empty".to_string(),
      }));
    }

    Ok(())
  }
}
