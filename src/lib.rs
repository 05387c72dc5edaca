#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # astpath
//!
//! Option loading and source-path canonicalization for clang front-end
//! plugins that emit per-file artifacts (e.g. serialized ASTs) during a
//! build.
//!
//! Multiple translation units may reference the same physical file through
//! different spellings: symlinks, build-sandbox copies, relative vs.
//! absolute paths. This library picks one canonical string per physical
//! file so artifacts can be deduplicated and attributed back to the
//! original repository layout.
//!
//! ## Core Types
//!
//! - [`PluginOptions`]: per-invocation configuration state and entry point
//! - [`PathNormalizer`]: the memoized canonicalization engine
//! - [`TranslationService`] and [`DeduplicationService`]: filesystem-backed
//!   collaborators shared between compiler processes
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: diagnostics on stderr
//!
//! ## Examples
//!
//! ```
//! use astpath::{parse_key_value_args, FixedEnv, PluginOptions};
//!
//! let map = parse_key_value_args([
//!     "OUTPUT_FILE=%.json",
//!     "MAKE_RELATIVE_TO=/repo",
//! ]);
//!
//! let mut options = PluginOptions::new();
//! options.load_values(&map, &FixedEnv::new()).unwrap();
//!
//! options.set_object_file("/out/a.o");
//! assert_eq!(options.output_file, "/out/a.o.json");
//!
//! // Without PREPEND_CURRENT_DIR no base path is set, so paths pass through.
//! assert_eq!(options.normalize_source_path("src/a.cc"), "src/a.cc");
//! ```

pub mod error;
pub mod logging;
pub mod options;
pub mod path;
pub mod services;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use options::{
    parse_key_value_args, EnvSource, FixedEnv, OptionLoader, OptionMap, Parsed, PluginOptions,
    ProcessEnv, ENV_PREFIX,
};
pub use path::PathNormalizer;
pub use services::{DeduplicationService, PathTranslator, TranslationService};
