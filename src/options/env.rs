//! Environment-variable sources for option loading.
//!
//! Option values may come from the process environment as a fallback for
//! build systems that cannot thread per-file plugin arguments. Lookups go
//! through the [`EnvSource`] capability so the loading logic can be tested
//! without mutating real process environment state.

use std::collections::HashMap;
use std::env;

/// A source of named environment values.
///
/// # Examples
///
/// ```
/// use astpath::{EnvSource, FixedEnv};
///
/// let env = FixedEnv::new().with_var("CLANG_FRONTEND_PLUGIN__OUTPUT_FILE", "out.json");
/// assert_eq!(env.get("CLANG_FRONTEND_PLUGIN__OUTPUT_FILE"), Some("out.json".to_string()));
/// assert_eq!(env.get("UNSET"), None);
/// ```
pub trait EnvSource {
    /// Look up a variable by its full name.
    ///
    /// Returns `None` when the variable is unset or not representable as a
    /// string.
    fn get(&self, name: &str) -> Option<String>;
}

/// The real process environment.
///
/// # Examples
///
/// ```
/// use astpath::{EnvSource, ProcessEnv};
///
/// let env = ProcessEnv;
/// // PATH is set in any reasonable environment
/// assert!(env.get("PATH").is_some() || env.get("Path").is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// A fixed, in-memory environment.
///
/// Used by tests and by embedders that want full control over the fallback
/// namespace.
///
/// # Examples
///
/// ```
/// use astpath::{EnvSource, FixedEnv};
///
/// let env = FixedEnv::new()
///     .with_var("CLANG_FRONTEND_PLUGIN__MAKE_RELATIVE_TO", "/repo");
/// assert_eq!(
///     env.get("CLANG_FRONTEND_PLUGIN__MAKE_RELATIVE_TO"),
///     Some("/repo".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedEnv {
    vars: HashMap<String, String>,
}

impl FixedEnv {
    /// Create an empty fixed environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, returning the updated environment.
    #[must_use]
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvSource for FixedEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
