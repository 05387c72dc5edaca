//! Plugin configuration loading.
//!
//! Configuration arrives as a flat list of `KEY=VALUE` plugin arguments,
//! with the environment as a fallback for build systems that cannot thread
//! per-file arguments. Arguments always win, so a caller can override the
//! environment.
//!
//! # Precedence
//!
//! For option key `K`, highest to lowest:
//!
//! 1. `K=VALUE` among the plugin arguments
//! 2. The `CLANG_FRONTEND_PLUGIN__K` environment variable
//! 3. The built-in default
//!
//! # Examples
//!
//! ```
//! use astpath::{parse_key_value_args, FixedEnv, PluginOptions};
//!
//! let map = parse_key_value_args([
//!     "OUTPUT_FILE=%.json",
//!     "MAKE_RELATIVE_TO=/repo",
//!     "RESOLVE_SYMLINKS=1",
//! ]);
//!
//! let mut options = PluginOptions::new();
//! options.load_values(&map, &FixedEnv::new()).unwrap();
//! assert!(options.resolve_symlinks());
//! ```

pub mod args;
pub mod env;
pub mod loader;
pub mod plugin;

pub use args::{parse_key_value_args, OptionMap};
pub use env::{EnvSource, FixedEnv, ProcessEnv};
pub use loader::{OptionLoader, Parsed, ENV_PREFIX};
pub use plugin::PluginOptions;
