//! Error types for the astpath library.
//!
//! This module provides the error hierarchy for all operations in the
//! astpath library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an astpath error.
///
/// # Examples
///
/// ```
/// use astpath::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("ok".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the astpath library.
///
/// Configuration problems deliberately do not surface here: option loading
/// degrades to defaults and logs instead of failing, so the plugin never
/// aborts a compiler invocation over advisory configuration. The variants
/// below cover path manipulation and service-directory I/O, the only places
/// a hard failure is meaningful.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A service backing directory could not be prepared.
    #[error("service directory {}: {reason}", directory.display())]
    ServiceDirectory {
        /// The directory the service was bound to.
        directory: PathBuf,
        /// The reason preparation failed.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
