//! Typed option resolution with argument/environment precedence.
//!
//! For a key `K`, a value is looked up first in the parsed argument map,
//! then under `CLANG_FRONTEND_PLUGIN__K` in the environment source. A value
//! found in neither place is simply absent; callers keep their defaults.
//!
//! Numeric loaders are best-effort: they parse the longest leading base-10
//! integer prefix and report through [`Parsed::complete`] whether the whole
//! string was consumed. Malformed input never fails the load; the caller
//! decides whether to log.

use crate::options::args::OptionMap;
use crate::options::env::EnvSource;

/// Prefix prepended to option keys when falling back to the environment.
///
/// For option key `K`, the checked variable is `CLANG_FRONTEND_PLUGIN__K`.
pub const ENV_PREFIX: &str = "CLANG_FRONTEND_PLUGIN__";

/// A best-effort parse result.
///
/// `value` always holds a usable value; `complete` is false when the raw
/// string was not entirely a valid number, in which case `value` is the
/// longest-prefix parse (zero when no digits were present at all).
///
/// # Examples
///
/// ```
/// use astpath::{parse_key_value_args, FixedEnv, OptionLoader};
///
/// let map = parse_key_value_args(["RESOLVE_SYMLINKS=abc"]);
/// let env = FixedEnv::new();
/// let loader = OptionLoader::new(&map, &env);
///
/// let parsed = loader.load_bool("RESOLVE_SYMLINKS").unwrap();
/// assert!(!parsed.complete);
/// assert!(!parsed.value); // zero fallback
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed<T> {
    /// The parsed value, possibly a partial or fallback result.
    pub value: T,
    /// Whether the raw string parsed cleanly in its entirety.
    pub complete: bool,
}

/// Resolves typed option values from an argument map with environment
/// fallback.
///
/// # Examples
///
/// ```
/// use astpath::{parse_key_value_args, FixedEnv, OptionLoader, ENV_PREFIX};
///
/// let map = parse_key_value_args(["OUTPUT_FILE=from-args"]);
/// let env = FixedEnv::new()
///     .with_var(&format!("{ENV_PREFIX}OUTPUT_FILE"), "from-env")
///     .with_var(&format!("{ENV_PREFIX}MAKE_RELATIVE_TO"), "/repo");
/// let loader = OptionLoader::new(&map, &env);
///
/// // Arguments take precedence over the environment.
/// assert_eq!(loader.load_string("OUTPUT_FILE"), Some("from-args".to_string()));
/// // The environment fills in what the arguments leave out.
/// assert_eq!(loader.load_string("MAKE_RELATIVE_TO"), Some("/repo".to_string()));
/// // Everything else is absent.
/// assert_eq!(loader.load_string("KEEP_EXTERNAL_PATHS"), None);
/// ```
pub struct OptionLoader<'a> {
    map: &'a OptionMap,
    env: &'a dyn EnvSource,
}

impl<'a> OptionLoader<'a> {
    /// Create a loader over an argument map and an environment source.
    #[must_use]
    pub fn new(map: &'a OptionMap, env: &'a dyn EnvSource) -> Self {
        Self { map, env }
    }

    /// Load a string value for `key`.
    ///
    /// Returns the argument-map entry verbatim when present, otherwise the
    /// `CLANG_FRONTEND_PLUGIN__{key}` environment value, otherwise `None`.
    #[must_use]
    pub fn load_string(&self, key: &str) -> Option<String> {
        if let Some(value) = self.map.get(key) {
            return Some(value.clone());
        }
        self.env.get(&format!("{ENV_PREFIX}{key}"))
    }

    /// Load a boolean value for `key`.
    ///
    /// The raw string is parsed as a base-10 integer; nonzero is true. A
    /// string without a clean integer parse yields `complete == false` and
    /// the longest-prefix value (false when no digits at all).
    #[must_use]
    pub fn load_bool(&self, key: &str) -> Option<Parsed<bool>> {
        self.load_string(key).map(|s| {
            let parsed = parse_integer_prefix(&s);
            Parsed {
                value: parsed.value != 0,
                complete: parsed.complete,
            }
        })
    }

    /// Load a signed integer value for `key`.
    ///
    /// Same best-effort semantics as [`OptionLoader::load_bool`]. Values
    /// beyond the `i64` range saturate.
    #[must_use]
    pub fn load_int(&self, key: &str) -> Option<Parsed<i64>> {
        self.load_string(key).map(|s| parse_integer_prefix(&s))
    }

    /// Load an unsigned integer value for `key`.
    ///
    /// Same best-effort semantics as [`OptionLoader::load_bool`]; a leading
    /// `-` is not consumed, so negative input parses as zero and incomplete.
    /// Values beyond the `u64` range saturate.
    #[must_use]
    pub fn load_unsigned_int(&self, key: &str) -> Option<Parsed<u64>> {
        self.load_string(key).map(|s| parse_unsigned_prefix(&s))
    }
}

/// Parse the longest leading base-10 signed integer prefix.
///
/// Leading ASCII whitespace and one optional sign are consumed first.
fn parse_integer_prefix(s: &str) -> Parsed<i64> {
    let bytes = s.trim_start().as_bytes();
    let mut idx = 0;
    let mut negative = false;

    if idx < bytes.len() && (bytes[idx] == b'+' || bytes[idx] == b'-') {
        negative = bytes[idx] == b'-';
        idx += 1;
    }

    let digits_start = idx;
    let mut magnitude: i64 = 0;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        let digit = i64::from(bytes[idx] - b'0');
        magnitude = magnitude.saturating_mul(10).saturating_add(digit);
        idx += 1;
    }

    let has_digits = idx > digits_start;
    Parsed {
        value: if has_digits {
            if negative {
                -magnitude
            } else {
                magnitude
            }
        } else {
            0
        },
        complete: has_digits && idx == bytes.len(),
    }
}

/// Parse the longest leading base-10 unsigned integer prefix.
fn parse_unsigned_prefix(s: &str) -> Parsed<u64> {
    let bytes = s.trim_start().as_bytes();
    let mut idx = 0;

    if idx < bytes.len() && bytes[idx] == b'+' {
        idx += 1;
    }

    let digits_start = idx;
    let mut value: u64 = 0;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        let digit = u64::from(bytes[idx] - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
        idx += 1;
    }

    let has_digits = idx > digits_start;
    Parsed {
        value: if has_digits { value } else { 0 },
        complete: has_digits && idx == bytes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::args::parse_key_value_args;
    use crate::options::env::FixedEnv;

    fn env_key(key: &str) -> String {
        format!("{ENV_PREFIX}{key}")
    }

    #[test]
    fn test_load_string_from_map() {
        let map = parse_key_value_args(["OUTPUT_FILE=out.json"]);
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);
        assert_eq!(
            loader.load_string("OUTPUT_FILE"),
            Some("out.json".to_string())
        );
    }

    #[test]
    fn test_load_string_from_env() {
        let map = OptionMap::new();
        let env = FixedEnv::new().with_var(&env_key("OUTPUT_FILE"), "env.json");
        let loader = OptionLoader::new(&map, &env);
        assert_eq!(
            loader.load_string("OUTPUT_FILE"),
            Some("env.json".to_string())
        );
    }

    #[test]
    fn test_load_string_map_takes_precedence() {
        let map = parse_key_value_args(["OUTPUT_FILE=x"]);
        let env = FixedEnv::new().with_var(&env_key("OUTPUT_FILE"), "y");
        let loader = OptionLoader::new(&map, &env);
        assert_eq!(loader.load_string("OUTPUT_FILE"), Some("x".to_string()));
    }

    #[test]
    fn test_load_string_absent() {
        let map = OptionMap::new();
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);
        assert_eq!(loader.load_string("OUTPUT_FILE"), None);
    }

    #[test]
    fn test_load_string_env_uses_prefix() {
        let map = OptionMap::new();
        // Unprefixed name must not be consulted.
        let env = FixedEnv::new().with_var("OUTPUT_FILE", "unprefixed");
        let loader = OptionLoader::new(&map, &env);
        assert_eq!(loader.load_string("OUTPUT_FILE"), None);
    }

    #[test]
    fn test_load_bool_true_and_false() {
        let map = parse_key_value_args(["A=1", "B=0", "C=42", "D=-1"]);
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);

        assert_eq!(
            loader.load_bool("A"),
            Some(Parsed {
                value: true,
                complete: true
            })
        );
        assert_eq!(
            loader.load_bool("B"),
            Some(Parsed {
                value: false,
                complete: true
            })
        );
        assert!(loader.load_bool("C").unwrap().value);
        assert!(loader.load_bool("D").unwrap().value);
    }

    #[test]
    fn test_load_bool_malformed_is_found_but_incomplete() {
        // Documented fallback: no digits parses to zero, hence false.
        let map = parse_key_value_args(["FLAG=abc"]);
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);

        let parsed = loader.load_bool("FLAG").unwrap();
        assert!(!parsed.complete);
        assert!(!parsed.value);
    }

    #[test]
    fn test_load_bool_partial_prefix() {
        let map = parse_key_value_args(["FLAG=1garbage"]);
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);

        let parsed = loader.load_bool("FLAG").unwrap();
        assert!(!parsed.complete);
        assert!(parsed.value);
    }

    #[test]
    fn test_load_bool_absent() {
        let map = OptionMap::new();
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);
        assert_eq!(loader.load_bool("FLAG"), None);
    }

    #[test]
    fn test_load_int() {
        let map = parse_key_value_args(["N=-17", "M= 42", "P=+5"]);
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);

        assert_eq!(
            loader.load_int("N"),
            Some(Parsed {
                value: -17,
                complete: true
            })
        );
        assert_eq!(
            loader.load_int("M"),
            Some(Parsed {
                value: 42,
                complete: true
            })
        );
        assert_eq!(
            loader.load_int("P"),
            Some(Parsed {
                value: 5,
                complete: true
            })
        );
    }

    #[test]
    fn test_load_int_saturates() {
        let map = parse_key_value_args(["N=99999999999999999999999999"]);
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);
        assert_eq!(loader.load_int("N").unwrap().value, i64::MAX);
    }

    #[test]
    fn test_load_unsigned_int() {
        let map = parse_key_value_args(["N=42", "NEG=-1"]);
        let env = FixedEnv::new();
        let loader = OptionLoader::new(&map, &env);

        assert_eq!(
            loader.load_unsigned_int("N"),
            Some(Parsed {
                value: 42,
                complete: true
            })
        );

        // A sign is not part of an unsigned parse.
        let neg = loader.load_unsigned_int("NEG").unwrap();
        assert!(!neg.complete);
        assert_eq!(neg.value, 0);
    }

    #[test]
    fn test_parse_integer_prefix_edge_cases() {
        assert_eq!(
            parse_integer_prefix(""),
            Parsed {
                value: 0,
                complete: false
            }
        );
        assert_eq!(
            parse_integer_prefix("-"),
            Parsed {
                value: 0,
                complete: false
            }
        );
        assert_eq!(
            parse_integer_prefix("12x"),
            Parsed {
                value: 12,
                complete: false
            }
        );
        assert_eq!(
            parse_integer_prefix("  7"),
            Parsed {
                value: 7,
                complete: true
            }
        );
    }
}
