//! Memoized source-path canonicalization.
//!
//! This is the core of the crate: the algorithm that turns an arbitrary path
//! string seen by the compiler into the single canonical string used for
//! artifact naming and deduplication.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::path::{absolute, relative};
use crate::services::PathTranslator;

/// Canonicalizes raw source paths according to a fixed policy, memoizing
/// results per raw input.
///
/// The pipeline for a cache miss is: absolutize against the base path,
/// translate sandbox copies to originals, then relativize against the
/// repository root (following a symlink first when configured). Every stage
/// degrades to pass-through when its input is missing; nothing here is
/// fatal.
///
/// The cache maps each raw input string, as first observed, to its canonical
/// output. Entries are never evicted, so a raw path always normalizes to the
/// same value for the lifetime of the normalizer, and cached lookups skip
/// the translation service entirely.
///
/// # Examples
///
/// ```
/// use astpath::PathNormalizer;
/// use std::path::PathBuf;
///
/// let mut normalizer = PathNormalizer::new()
///     .with_base_path(PathBuf::from("/repo"))
///     .with_repo_root(PathBuf::from("/repo"));
///
/// assert_eq!(normalizer.normalize("sub/a.cc"), "sub/a.cc");
/// assert_eq!(normalizer.normalize("/repo/sub/b.cc"), "sub/b.cc");
/// ```
#[derive(Default)]
pub struct PathNormalizer {
    /// Working directory anchoring relative inputs; unset disables
    /// normalization entirely.
    base_path: Option<PathBuf>,
    /// Root to express canonical paths relative to; unset skips relativizing.
    repo_root: Option<PathBuf>,
    /// Policy for paths outside the repository root.
    keep_external_paths: bool,
    /// Follow symlinks before relativizing.
    resolve_symlinks: bool,
    /// Optional sandbox-copy translation.
    translator: Option<Box<dyn PathTranslator>>,
    /// Raw input string to canonical output.
    cache: HashMap<String, String>,
}

impl PathNormalizer {
    /// Create a normalizer with no base path, which passes every input
    /// through verbatim.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory anchoring relative inputs.
    #[must_use]
    pub fn with_base_path(mut self, base_path: PathBuf) -> Self {
        if !base_path.as_os_str().is_empty() {
            self.base_path = Some(base_path);
        }
        self
    }

    /// Set the repository root for relative rewriting.
    #[must_use]
    pub fn with_repo_root(mut self, repo_root: PathBuf) -> Self {
        if !repo_root.as_os_str().is_empty() {
            self.repo_root = Some(repo_root);
        }
        self
    }

    /// Configure the policy for paths outside the repository root.
    ///
    /// See [`crate::path::relative::make_relative`] for the exact policy.
    #[must_use]
    pub fn with_keep_external_paths(mut self, keep: bool) -> Self {
        self.keep_external_paths = keep;
        self
    }

    /// Configure whether symlinks are followed before relativizing.
    #[must_use]
    pub fn with_resolve_symlinks(mut self, resolve: bool) -> Self {
        self.resolve_symlinks = resolve;
        self
    }

    /// Attach a translation service mapping sandbox copies to originals.
    #[must_use]
    pub fn with_translator(mut self, translator: Box<dyn PathTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Canonicalize `raw`, returning the memoized result.
    ///
    /// The returned slice borrows from the internal cache; its value is
    /// stable for the lifetime of the normalizer because entries are never
    /// evicted or rewritten.
    pub fn normalize(&mut self, raw: &str) -> &str {
        if self.cache.contains_key(raw) {
            return &self.cache[raw];
        }
        let value = self.compute(raw);
        log::debug!("normalized {raw} to {value}");
        self.cache.entry(raw.to_owned()).or_insert(value)
    }

    /// The cached canonical form of `raw`, if it was normalized before.
    #[must_use]
    pub fn cached(&self, raw: &str) -> Option<&str> {
        self.cache.get(raw).map(String::as_str)
    }

    /// Number of distinct raw paths normalized so far.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn compute(&self, raw: &str) -> String {
        // Without a base path, normalization is a deliberate no-op.
        let Some(base) = &self.base_path else {
            return raw.to_string();
        };

        // Lexical absolutize; a malformed input (e.g. ".." escaping the
        // root) degrades to pass-through rather than failing the caller.
        let absolute = match absolute::make_absolute(base, Path::new(raw)) {
            Ok(path) => path,
            Err(e) => {
                log::debug!("absolutize failed for {raw}: {e}");
                return raw.to_string();
            }
        };

        let translated = match &self.translator {
            Some(translator) => translator.find_original_file(&absolute),
            None => absolute,
        };

        let Some(repo_root) = &self.repo_root else {
            return translated.to_string_lossy().into_owned();
        };

        if self.resolve_symlinks {
            // Relativize the link target, not the link itself. The target is
            // used exactly as read; a read failure falls through silently.
            if let Ok(target) = fs::read_link(&translated) {
                return relative::make_relative(repo_root, &target, self.keep_external_paths);
            }
        }

        relative::make_relative(repo_root, &translated, self.keep_external_paths)
    }
}
