//! Change-list interpretation
//!
//! Turns `git diff --numstat` output into workspace-root locations:
//! - **parser**: numstat lines → [`ChangeRecord`], rename notation resolution
//! - **location**: changed path → enclosing `category/workspace` directory

pub mod location;
pub mod parser;

pub use location::root_of;
pub use parser::{ChangeRecord, parse};
