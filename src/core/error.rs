//! Error types for affected-packs with contextual messages and exit codes
//!
//! Only failures to obtain the two foundational documents (the diff summary and
//! the workspace graph) are fatal. Graph-level anomalies are recovered where they
//! happen and never become a `PackError`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for affected-packs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, bad patterns)
  User = 1,
  /// System error (git, yarn, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for affected-packs
#[derive(Debug)]
pub enum PackError {
  /// Configuration errors
  Config(ConfigError),

  /// External tool failures (diff source, graph source)
  Source(SourceError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PackError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PackError::Message { message, context, help } => PackError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      PackError::Io(err) => PackError::Io(io::Error::new(err.kind(), format!("{}: {}", ctx_str, err))),
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PackError::Config(_) => ExitCode::User,
      PackError::Source(_) => ExitCode::System,
      PackError::Io(_) => ExitCode::System,
      PackError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PackError::Config(e) => e.help_message(),
      PackError::Source(e) => e.help_message(),
      PackError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for PackError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackError::Config(e) => write!(f, "{}", e),
      PackError::Source(e) => write!(f, "{}", e),
      PackError::Io(e) => write!(f, "I/O error: {}", e),
      PackError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PackError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PackError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PackError {
  fn from(err: io::Error) -> Self {
    PackError::Io(err)
  }
}

impl From<String> for PackError {
  fn from(msg: String) -> Self {
    PackError::message(msg)
  }
}

impl From<&str> for PackError {
  fn from(msg: &str) -> Self {
    PackError::message(msg)
  }
}

impl From<toml_edit::de::Error> for PackError {
  fn from(err: toml_edit::de::Error) -> Self {
    PackError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for PackError {
  fn from(err: serde_json::Error) -> Self {
    PackError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit config path does not exist
  NotFound { path: PathBuf },

  /// No watched directories from CLI or config
  NoWatchedDirectories,

  /// A glob pattern failed to compile
  InvalidPattern { pattern: String, reason: String },

  /// A field holds an unusable value
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Check the --config path, or drop it to use packs.toml discovery.".to_string()),
      ConfigError::NoWatchedDirectories => {
        Some("Pass --dir <directory> (repeatable) or set `watch.directories` in packs.toml.".to_string())
      }
      ConfigError::InvalidPattern { .. } => {
        Some("Patterns use glob syntax, e.g. `**`, `app/**` or `library/core-*`.".to_string())
      }
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::NoWatchedDirectories => write!(f, "No watched directories configured"),
      ConfigError::InvalidPattern { pattern, reason } => {
        write!(f, "Invalid glob pattern '{}': {}", pattern, reason)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for '{}': {}", field, reason)
      }
    }
  }
}

/// Failures of the external document sources. Always fatal.
#[derive(Debug)]
pub enum SourceError {
  /// Command could not be spawned or exited non-zero
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Top-level document could not be decoded
  MalformedDocument { source: String, reason: String },
}

impl SourceError {
  fn help_message(&self) -> Option<String> {
    match self {
      SourceError::CommandFailed { command, stderr } => {
        if command.starts_with("git") && (stderr.contains("unknown revision") || stderr.contains("bad revision")) {
          Some("The base ref is missing locally. Fetch it first (e.g. `git fetch origin main`) or pass --since.".to_string())
        } else if command.starts_with("yarn") {
          Some("Run the command from the monorepo root, or snapshot the graph and pass --graph-file.".to_string())
        } else {
          None
        }
      }
      SourceError::RepoNotFound { path } => Some(format!(
        "Run affected-packs inside a git checkout (looked at {}).",
        path.display()
      )),
      SourceError::MalformedDocument { .. } => {
        Some("Expected the output of `yarn --json workspaces info`, or the bare workspace mapping.".to_string())
      }
    }
  }
}

impl fmt::Display for SourceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SourceError::CommandFailed { command, stderr } => {
        write!(f, "Command failed: {}\n{}", command, stderr)
      }
      SourceError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      SourceError::MalformedDocument { source, reason } => {
        write!(f, "Malformed workspace document from {}: {}", source, reason)
      }
    }
  }
}

/// Result type alias for affected-packs
pub type PackResult<T> = Result<T, PackError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PackResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PackError>,
{
  fn context(self, ctx: impl Into<String>) -> PackResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PackError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
