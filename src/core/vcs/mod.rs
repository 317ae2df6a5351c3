//! Git access for change detection

pub mod system_git;

pub use system_git::{GitDiff, SystemGit};

/// Ref the working tree is compared against when none is configured.
pub const DEFAULT_BASE: &str = "origin/main";
