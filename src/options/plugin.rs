//! Plugin option state and configuration loading.
//!
//! [`PluginOptions`] is constructed once per plugin invocation, loads its
//! configuration from the argument map and environment, and afterwards
//! answers `normalize_source_path` for every source path the front-end
//! touches.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::logging::Logger;
use crate::options::args::OptionMap;
use crate::options::env::{EnvSource, ProcessEnv};
use crate::options::loader::OptionLoader;
use crate::path::PathNormalizer;
use crate::services::{DeduplicationService, TranslationService};

/// Placeholder character in an output-file template, substituted with the
/// per-translation-unit object file path.
const OUTPUT_PLACEHOLDER: char = '%';

/// Configuration state for one plugin invocation.
///
/// Holds the output/object file paths, the path-normalization policy, and
/// the optional service handles. Configuration problems never fail the
/// compiler invocation: values that do not parse are logged and defaulted;
/// the only hard failure is an I/O error preparing a service directory.
///
/// # Examples
///
/// ```
/// use astpath::{parse_key_value_args, FixedEnv, PluginOptions};
///
/// let map = parse_key_value_args(["OUTPUT_FILE=%.json", "MAKE_RELATIVE_TO=/repo"]);
/// let mut options = PluginOptions::new();
/// options.load_values(&map, &FixedEnv::new()).unwrap();
///
/// options.set_object_file("/out/a.o");
/// assert_eq!(options.output_file, "/out/a.o.json");
/// ```
#[derive(Default)]
pub struct PluginOptions {
    /// Output path, or a template starting with `%` to be completed by
    /// [`PluginOptions::set_object_file`]. Typically seeded from the primary
    /// plugin argument and overridable via `OUTPUT_FILE`.
    pub output_file: String,
    /// Object file of the current translation unit.
    pub object_file: String,
    base_path: Option<PathBuf>,
    repo_root: Option<PathBuf>,
    keep_external_paths: bool,
    resolve_symlinks: bool,
    deduplication: Option<DeduplicationService>,
    normalizer: PathNormalizer,
    logger: Logger,
}

impl PluginOptions {
    /// Create unconfigured options: no base path, so normalization passes
    /// paths through until [`PluginOptions::load_values`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the logger used for configuration diagnostics.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Load configuration from `map` with `env` as the fallback namespace.
    ///
    /// Recognized keys: `OUTPUT_FILE`, `PREPEND_CURRENT_DIR`,
    /// `MAKE_RELATIVE_TO`, `KEEP_EXTERNAL_PATHS`, `RESOLVE_SYMLINKS`,
    /// `USE_TEMP_DIR_FOR_DEDUPLICATION`, `USE_TEMP_DIR_FOR_COPIED_PATHS`.
    /// Bool values that do not parse cleanly are logged and used best-effort;
    /// a failure to query the working directory is logged and leaves
    /// normalization disabled.
    ///
    /// # Errors
    ///
    /// Returns an error only if a configured service directory cannot be
    /// prepared.
    pub fn load_values(&mut self, map: &OptionMap, env: &dyn EnvSource) -> Result<()> {
        let loader = OptionLoader::new(map, env);

        // Possibly override the value taken from the primary argument.
        if let Some(value) = loader.load_string("OUTPUT_FILE") {
            self.output_file = value;
        }

        let prepend_current_dir = self.load_flag(&loader, "PREPEND_CURRENT_DIR", false);
        if prepend_current_dir {
            match env::current_dir() {
                Ok(current) => self.base_path = Some(current),
                Err(e) => {
                    self.logger
                        .warn(&format!("failed to retrieve current working directory: {e}"));
                }
            }
        }

        self.repo_root = loader
            .load_string("MAKE_RELATIVE_TO")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        self.keep_external_paths = self.load_flag(&loader, "KEEP_EXTERNAL_PATHS", false);
        self.resolve_symlinks = self.load_flag(&loader, "RESOLVE_SYMLINKS", false);

        if let Some(dir) = loader
            .load_string("USE_TEMP_DIR_FOR_DEDUPLICATION")
            .filter(|s| !s.is_empty())
        {
            self.deduplication = Some(DeduplicationService::new(Path::new(&dir))?);
        }

        let translation = match loader
            .load_string("USE_TEMP_DIR_FOR_COPIED_PATHS")
            .filter(|s| !s.is_empty())
        {
            Some(dir) => Some(TranslationService::new(Path::new(&dir))?),
            None => None,
        };

        let mut normalizer = PathNormalizer::new()
            .with_keep_external_paths(self.keep_external_paths)
            .with_resolve_symlinks(self.resolve_symlinks);
        if let Some(base) = &self.base_path {
            normalizer = normalizer.with_base_path(base.clone());
        }
        if let Some(root) = &self.repo_root {
            normalizer = normalizer.with_repo_root(root.clone());
        }
        if let Some(service) = translation {
            normalizer = normalizer.with_translator(Box::new(service));
        }
        self.normalizer = normalizer;

        Ok(())
    }

    /// Load configuration using the real process environment as fallback.
    ///
    /// # Errors
    ///
    /// Same as [`PluginOptions::load_values`].
    pub fn load_values_from_env_and_map(&mut self, map: &OptionMap) -> Result<()> {
        self.load_values(map, &ProcessEnv)
    }

    /// Store the object file of the current translation unit and complete a
    /// templated output path.
    ///
    /// When `path` is non-empty and `output_file` starts with the `%`
    /// placeholder, `output_file` becomes `path` followed by the template
    /// remainder. The substitution fires at most once per template since the
    /// result no longer starts with the placeholder.
    pub fn set_object_file(&mut self, path: &str) {
        self.object_file = path.to_string();
        if !path.is_empty() {
            if let Some(rest) = self.output_file.strip_prefix(OUTPUT_PLACEHOLDER) {
                self.output_file = format!("{path}{rest}");
            }
        }
    }

    /// Canonicalize a source path seen by the front-end.
    ///
    /// Memoized; see [`PathNormalizer::normalize`].
    pub fn normalize_source_path(&mut self, path: &str) -> &str {
        self.normalizer.normalize(path)
    }

    /// Base directory anchoring relative inputs, when configured.
    #[must_use]
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Repository root for relative rewriting, when configured.
    #[must_use]
    pub fn repo_root(&self) -> Option<&Path> {
        self.repo_root.as_deref()
    }

    /// Policy for paths outside the repository root.
    #[must_use]
    pub fn keep_external_paths(&self) -> bool {
        self.keep_external_paths
    }

    /// Whether symlinks are followed before relativizing.
    #[must_use]
    pub fn resolve_symlinks(&self) -> bool {
        self.resolve_symlinks
    }

    /// The deduplication service, when configured.
    #[must_use]
    pub fn deduplication(&self) -> Option<&DeduplicationService> {
        self.deduplication.as_ref()
    }

    fn load_flag(&self, loader: &OptionLoader<'_>, key: &str, default: bool) -> bool {
        match loader.load_bool(key) {
            Some(parsed) => {
                if !parsed.complete {
                    self.logger.warn(&format!("failed to read a bool from {key}"));
                }
                parsed.value
            }
            None => default,
        }
    }
}
