//! Core engine for affected-packs
//!
//! - **config**: packs.toml parsing and validation
//! - **context**: run context shared by commands (root + merged settings)
//! - **error**: error types with contextual help messages and exit codes
//! - **resolver**: change list → affected workspaces → packs
//! - **vcs**: git operations (SystemGit) and the live diff source

pub mod config;
pub mod context;
pub mod error;
pub mod resolver;
pub mod vcs;
