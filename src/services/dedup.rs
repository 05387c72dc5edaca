//! First-claim deduplication markers.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::services::escape_for_filename;

/// Tracks which artifact keys have already been claimed, across every
/// process sharing the backing directory.
///
/// A key is claimed by exclusively creating its marker file; the filesystem
/// guarantees a single winner even under concurrent compiler invocations.
/// Typical keys are content hashes or normalized source paths.
///
/// # Examples
///
/// ```no_run
/// use astpath::DeduplicationService;
/// use std::path::Path;
///
/// let service = DeduplicationService::new(Path::new("/tmp/dedup")).unwrap();
/// if service.verify_key("deadbeef") {
///     // first claimant: emit the artifact
/// }
/// assert!(!service.verify_key("deadbeef"));
/// ```
pub struct DeduplicationService {
    root: PathBuf,
}

impl DeduplicationService {
    /// Create a deduplication service backed by `root`, creating the
    /// directory if it does not exist.
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

    /// Claim `key`, returning true only for the first claimant.
    ///
    /// Marker creation failures other than "already exists" are treated as
    /// an unsuccessful claim and logged at debug level; a lost marker means
    /// at worst a duplicate artifact, never a missing one.
    #[must_use]
    pub fn verify_key(&self, key: &str) -> bool {
        let marker = self.root.join(escape_for_filename(key));
        match OpenOptions::new().write(true).create_new(true).open(&marker) {
            Ok(_) => true,
            Err(e) => {
                if e.kind() != ErrorKind::AlreadyExists {
                    log::debug!("dedup marker {} failed: {e}", marker.display());
                }
                false
            }
        }
    }
}
