//! Plugin argument parsing.
//!
//! The host compiler hands the plugin a flat list of argument strings.
//! Entries of the form `KEY=VALUE` configure options; anything else is
//! consumed elsewhere (e.g. the primary output-file argument) and is not an
//! error here.

use std::collections::HashMap;

/// Parsed plugin options, keyed by option name.
///
/// Keys are unique; when an argument list repeats a key, the last value wins.
pub type OptionMap = HashMap<String, String>;

/// Parse a flat list of argument strings into an [`OptionMap`].
///
/// Each entry is split on the first `=`. Entries without `=` are silently
/// ignored. There is no failure mode.
///
/// # Examples
///
/// ```
/// use astpath::parse_key_value_args;
///
/// let map = parse_key_value_args(["OUTPUT_FILE=%.json", "RESOLVE_SYMLINKS=1", "out.json"]);
/// assert_eq!(map.get("OUTPUT_FILE").map(String::as_str), Some("%.json"));
/// assert_eq!(map.get("RESOLVE_SYMLINKS").map(String::as_str), Some("1"));
/// // "out.json" has no '=' and is not an option
/// assert_eq!(map.len(), 2);
/// ```
pub fn parse_key_value_args<I, S>(args: I) -> OptionMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = OptionMap::new();
    for arg in args {
        if let Some((key, value)) = arg.as_ref().split_once('=') {
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}
