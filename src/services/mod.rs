//! Filesystem-backed collaborator services.
//!
//! Build systems that sandbox compilations may copy source files and may run
//! many compiler processes against one shared scratch directory. The services
//! here use that directory as their store:
//!
//! - [`TranslationService`] maps a sandbox copy back to the logical original
//!   file it represents.
//! - [`DeduplicationService`] lets exactly one process claim a key, so
//!   artifacts with identical content are emitted once.
//!
//! Cross-process consistency comes from the filesystem primitives used
//! (exclusive file creation); no locking happens in this crate.

pub mod dedup;
pub mod translation;

pub use dedup::DeduplicationService;
pub use translation::{PathTranslator, TranslationService};

/// Escape a path string into a single flat filename.
///
/// `%` and the path separators are percent-escaped so distinct paths map to
/// distinct entry names within one store directory.
fn escape_for_filename(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '/' => escaped.push_str("%2F"),
            '\\' => escaped.push_str("%5C"),
            _ => escaped.push(c),
        }
    }
    escaped
}
