//! Repository-root relativization.
//!
//! Canonical paths are expressed relative to a repository root so artifacts
//! keyed by them are stable across checkouts and build sandboxes.

use std::path::Path;

/// Rewrite `path` relative to `repo_root`.
///
/// A path strictly under `repo_root` becomes its relative remainder. A path
/// equal to the root or outside it is external:
/// - with `keep_external` the path comes back unchanged;
/// - without it the result is the empty string, the sentinel for "not
///   attributable to the repository". Callers that name artifacts can filter
///   on emptiness.
///
/// The comparison is lexical; paths are expected to be pre-cleaned (see
/// [`crate::path::absolute::make_absolute`]). The result uses a lossy UTF-8
/// rendering of the remainder.
///
/// # Examples
///
/// ```
/// use astpath::path::relative::make_relative;
/// use std::path::Path;
///
/// let root = Path::new("/repo");
/// assert_eq!(make_relative(root, Path::new("/repo/sub/a.cc"), false), "sub/a.cc");
/// assert_eq!(make_relative(root, Path::new("/other/b.cc"), true), "/other/b.cc");
/// assert_eq!(make_relative(root, Path::new("/other/b.cc"), false), "");
/// ```
#[must_use]
pub fn make_relative(repo_root: &Path, path: &Path, keep_external: bool) -> String {
    if let Ok(remainder) = path.strip_prefix(repo_root) {
        if !remainder.as_os_str().is_empty() {
            return remainder.to_string_lossy().into_owned();
        }
    }

    if keep_external {
        path.to_string_lossy().into_owned()
    } else {
        String::new()
    }
}
