//! Changed path → workspace root

use super::parser::ChangeRecord;

/// Workspace-root directory of a changed path: its first two `/` segments.
///
/// `library/library-a/src/deep/file.ts` → `library/library-a`.
/// A path with a single segment yields that segment alone (best-effort join);
/// an empty path yields an empty string.
pub fn root_of(change: &ChangeRecord) -> String {
  change.path.split('/').take(2).collect::<Vec<_>>().join("/")
}
