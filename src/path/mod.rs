//! Source-path canonicalization.
//!
//! Multiple translation units may reference one physical file through
//! different spellings: relative vs. absolute paths, symlinks, or
//! build-sandbox copies. This module picks a single canonical string per
//! file so downstream artifacts can be deduplicated and attributed back to
//! the repository layout.
//!
//! # Pipeline
//!
//! [`PathNormalizer::normalize`] runs, per raw input:
//!
//! 1. **Absolutize** ([`absolute`]): tilde expansion, anchoring at the base
//!    directory, lexical `.` / `..` resolution.
//! 2. **Translate** ([`crate::services::translation`]): map sandbox copies
//!    back to the original file, when a translation service is configured.
//! 3. **Relativize** ([`relative`]): express the path relative to the
//!    repository root, optionally following a symlink first.
//!
//! Results are memoized per raw input for the lifetime of the normalizer.
//!
//! # Examples
//!
//! ```
//! use astpath::PathNormalizer;
//! use std::path::PathBuf;
//!
//! let mut normalizer = PathNormalizer::new()
//!     .with_base_path(PathBuf::from("/repo"))
//!     .with_repo_root(PathBuf::from("/repo"));
//!
//! assert_eq!(normalizer.normalize("sub/a.cc"), "sub/a.cc");
//! ```

pub mod absolute;
pub mod normalizer;
pub mod relative;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use normalizer::PathNormalizer;
