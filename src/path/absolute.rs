//! Absolute-path construction.
//!
//! This module turns the raw path spellings a compiler front-end sees into
//! clean absolute paths by:
//! - Expanding tilde (~) to the home directory
//! - Anchoring relative paths at a caller-supplied base directory
//! - Resolving `.` and `..` components lexically

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user`
/// syntax. Paths not starting with `~` come back unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - The path contains invalid UTF-8
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use astpath::path::absolute::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components in a path lexically.
///
/// No filesystem access is performed; `a/../b` resolves to `b` even when
/// `a` is a symlink.
///
/// # Errors
///
/// Returns an error if the path contains too many `..` components that would
/// escape the root directory.
///
/// # Examples
///
/// ```
/// use astpath::path::absolute::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
///
/// let resolved = resolve_components(Path::new("/a/b/../../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/c"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                // Windows prefix
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => {
                result.push(c);
            }
            Component::CurDir => {
                // Skip "." - it doesn't change the path
            }
            Component::ParentDir => {
                if !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)".to_string(),
                    });
                }
            }
        }
    }

    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }

    Ok(result)
}

/// Build a clean absolute path by anchoring `path` at `base`.
///
/// Already-absolute paths keep their anchor and are only cleaned. Tilde is
/// expanded first so option values like `~/repo` work.
///
/// # Errors
///
/// Returns an error if:
/// - Tilde expansion fails
/// - The path contains too many `..` components
///
/// # Examples
///
/// ```
/// use astpath::path::absolute::make_absolute;
/// use std::path::Path;
///
/// let abs = make_absolute(Path::new("/repo"), Path::new("a.cc")).unwrap();
/// assert_eq!(abs, Path::new("/repo/a.cc"));
///
/// let abs = make_absolute(Path::new("/repo"), Path::new("/other/b.cc")).unwrap();
/// assert_eq!(abs, Path::new("/other/b.cc"));
///
/// let abs = make_absolute(Path::new("/repo"), Path::new("sub/../a.cc")).unwrap();
/// assert_eq!(abs, Path::new("/repo/a.cc"));
/// ```
pub fn make_absolute(base: &Path, path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let anchored = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };

    resolve_components(&anchored)
}
