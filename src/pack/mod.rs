//! Output shaping
//!
//! - **filter**: glob inclusion pattern over workspace locations
//! - **packer**: role/size-aware grouping of workspaces into CI packs

pub mod filter;
pub mod packer;

pub use filter::NameFilter;
pub use packer::{Packer, ProjectPack};
