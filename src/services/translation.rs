//! Translation of sandbox copies back to original files.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::error::{Error, Result};
use crate::services::escape_for_filename;

/// Upper bound on copy-of-copy chains followed by a lookup.
///
/// Keeps a cyclic mapping directory from hanging a lookup.
const MAX_COPY_DEPTH: usize = 16;

/// Maps an absolute path to the original file it logically represents.
///
/// Implementations must be deterministic and side-effect-free from the
/// caller's perspective: the normalizer caches results and assumes two
/// lookups of the same path agree.
#[cfg_attr(test, automock)]
pub trait PathTranslator {
    /// Return the original file for `absolute`, or `absolute` itself when no
    /// mapping is known.
    fn find_original_file(&self, absolute: &Path) -> PathBuf;
}

/// A directory of copy-to-original mappings shared between processes.
///
/// Each mapping is one file: the filename is the escaped copy path, the
/// contents are the original path. Writers record mappings as they copy
/// sources into the sandbox; compiler plugins only read.
///
/// # Examples
///
/// ```no_run
/// use astpath::{PathTranslator, TranslationService};
/// use std::path::Path;
///
/// let service = TranslationService::new(Path::new("/tmp/copies")).unwrap();
/// service
///     .record_copy(Path::new("/repo/a.cc"), Path::new("/sandbox/a.cc"))
///     .unwrap();
/// assert_eq!(
///     service.find_original_file(Path::new("/sandbox/a.cc")),
///     Path::new("/repo/a.cc").to_path_buf()
/// );
/// ```
pub struct TranslationService {
    root: PathBuf,
}

impl TranslationService {
    /// Create a translation service backed by `root`, creating the directory
    /// if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or is not a
    /// directory.
    pub fn new(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        if !root.is_dir() {
            return Err(Error::ServiceDirectory {
                directory: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// The backing directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record that `copy` is a copy of `original`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping entry cannot be written.
    pub fn record_copy(&self, original: &Path, copy: &Path) -> Result<()> {
        fs::write(
            self.entry_path(copy),
            original.to_string_lossy().as_bytes(),
        )?;
        Ok(())
    }

    fn entry_path(&self, path: &Path) -> PathBuf {
        self.root.join(escape_for_filename(&path.to_string_lossy()))
    }
}

impl PathTranslator for TranslationService {
    fn find_original_file(&self, absolute: &Path) -> PathBuf {
        let mut current = absolute.to_path_buf();
        for _ in 0..MAX_COPY_DEPTH {
            let Ok(contents) = fs::read_to_string(self.entry_path(&current)) else {
                break;
            };
            let original = contents.trim_end();
            if original.is_empty() || Path::new(original) == current {
                break;
            }
            log::debug!("translated {} to {original}", current.display());
            current = PathBuf::from(original);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("copies");
        let service = TranslationService::new(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(service.root(), root);
    }

    #[test]
    fn test_unknown_path_passes_through() {
        let dir = tempdir().unwrap();
        let service = TranslationService::new(dir.path()).unwrap();
        let path = Path::new("/sandbox/unknown.cc");
        assert_eq!(service.find_original_file(path), path.to_path_buf());
    }

    #[test]
    fn test_recorded_copy_translates() {
        let dir = tempdir().unwrap();
        let service = TranslationService::new(dir.path()).unwrap();
        service
            .record_copy(Path::new("/repo/a.cc"), Path::new("/sandbox/a.cc"))
            .unwrap();

        assert_eq!(
            service.find_original_file(Path::new("/sandbox/a.cc")),
            PathBuf::from("/repo/a.cc")
        );
    }

    #[test]
    fn test_copy_of_copy_chains() {
        let dir = tempdir().unwrap();
        let service = TranslationService::new(dir.path()).unwrap();
        service
            .record_copy(Path::new("/repo/a.cc"), Path::new("/stage1/a.cc"))
            .unwrap();
        service
            .record_copy(Path::new("/stage1/a.cc"), Path::new("/stage2/a.cc"))
            .unwrap();

        assert_eq!(
            service.find_original_file(Path::new("/stage2/a.cc")),
            PathBuf::from("/repo/a.cc")
        );
    }

    #[test]
    fn test_cyclic_mapping_terminates() {
        let dir = tempdir().unwrap();
        let service = TranslationService::new(dir.path()).unwrap();
        service
            .record_copy(Path::new("/b/x.cc"), Path::new("/a/x.cc"))
            .unwrap();
        service
            .record_copy(Path::new("/a/x.cc"), Path::new("/b/x.cc"))
            .unwrap();

        // Just terminate with one of the two; the hop bound cuts the cycle.
        let result = service.find_original_file(Path::new("/a/x.cc"));
        assert!(result == Path::new("/a/x.cc") || result == Path::new("/b/x.cc"));
    }

    #[test]
    fn test_self_mapping_terminates() {
        let dir = tempdir().unwrap();
        let service = TranslationService::new(dir.path()).unwrap();
        service
            .record_copy(Path::new("/a/x.cc"), Path::new("/a/x.cc"))
            .unwrap();
        assert_eq!(
            service.find_original_file(Path::new("/a/x.cc")),
            PathBuf::from("/a/x.cc")
        );
    }

    #[test]
    fn test_lookup_is_repeatable() {
        let dir = tempdir().unwrap();
        let service = TranslationService::new(dir.path()).unwrap();
        service
            .record_copy(Path::new("/repo/a.cc"), Path::new("/sandbox/a.cc"))
            .unwrap();

        let first = service.find_original_file(Path::new("/sandbox/a.cc"));
        let second = service.find_original_file(Path::new("/sandbox/a.cc"));
        assert_eq!(first, second);
    }
}
