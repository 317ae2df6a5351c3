//! Integration tests for affected-packs
//!
//! Each test builds a throwaway yarn monorepo under git, snapshots its
//! workspace graph to a file and runs the compiled binary against it.

mod helpers;
mod test_affected;
mod test_packs;
