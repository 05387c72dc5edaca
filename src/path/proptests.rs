//! Property-based tests for path canonicalization.
//!
//! Note: the absolute module already has example-based coverage of tilde
//! expansion and component resolution. This module focuses on algebraic
//! properties of absolutize/relativize and of the memoized normalizer.

use super::absolute::{make_absolute, resolve_components};
use super::normalizer::PathNormalizer;
use super::relative::make_relative;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

fn relative_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8)
        .prop_map(|parts| parts.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // make_absolute always yields an absolute path for clean inputs
    #[test]
    fn make_absolute_yields_absolute(base in absolute_path_strategy(), rel in relative_path_strategy()) {
        let abs = make_absolute(&base, &rel).unwrap();
        prop_assert!(abs.is_absolute());
    }

    // Absolutizing an already-absolute clean path is the identity
    #[test]
    fn make_absolute_preserves_absolute(base in absolute_path_strategy(), path in absolute_path_strategy()) {
        let abs = make_absolute(&base, &path).unwrap();
        prop_assert_eq!(abs, path);
    }

    // Component resolution is idempotent
    #[test]
    fn resolve_components_idempotent(path in absolute_path_strategy()) {
        if let Ok(once) = resolve_components(&path) {
            let twice = resolve_components(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    // A path built under the root always relativizes to its remainder
    #[test]
    fn relativize_inverts_join(root in absolute_path_strategy(), rel in relative_path_strategy(), keep in any::<bool>()) {
        let joined = root.join(&rel);
        let result = make_relative(&root, &joined, keep);
        prop_assert_eq!(PathBuf::from(result), rel);
    }

    // Relativization of external paths is determined by the keep flag
    #[test]
    fn relativize_external_policy(root in absolute_path_strategy(), other in absolute_path_strategy(), keep in any::<bool>()) {
        prop_assume!(!other.starts_with(&root));
        let result = make_relative(&root, &other, keep);
        if keep {
            prop_assert_eq!(PathBuf::from(result), other);
        } else {
            prop_assert!(result.is_empty());
        }
    }

    // A normalizer without a base path is the identity on any input
    #[test]
    fn passthrough_without_base_path(raw in "[a-zA-Z0-9_./-]{1,40}") {
        let mut normalizer = PathNormalizer::new();
        prop_assert_eq!(normalizer.normalize(&raw), raw.as_str());
    }

    // Normalization is memoized: repeated calls agree and add no entries
    #[test]
    fn normalize_memoized(base in absolute_path_strategy(), rel in relative_path_strategy()) {
        let mut normalizer = PathNormalizer::new()
            .with_base_path(base.clone())
            .with_repo_root(base);
        let raw = rel.to_string_lossy().into_owned();

        let first = normalizer.normalize(&raw).to_string();
        let second = normalizer.normalize(&raw).to_string();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(normalizer.cache_len(), 1);
    }

    // With base == repo root, clean relative inputs canonicalize to themselves
    #[test]
    fn clean_relative_inputs_are_fixed_points(base in absolute_path_strategy(), rel in relative_path_strategy()) {
        let mut normalizer = PathNormalizer::new()
            .with_base_path(base.clone())
            .with_repo_root(base);
        let raw = rel.to_string_lossy().into_owned();
        prop_assert_eq!(PathBuf::from(normalizer.normalize(&raw)), rel);
    }

    // Canonical output never contains "." or ".." components when anchored
    #[test]
    fn canonical_output_is_clean(base in absolute_path_strategy(), rel in relative_path_strategy()) {
        let mut normalizer = PathNormalizer::new().with_base_path(base);
        let raw = format!("./{}", rel.to_string_lossy());
        let canonical = normalizer.normalize(&raw).to_string();
        for component in Path::new(&canonical).components() {
            prop_assert_ne!(component, std::path::Component::CurDir);
            prop_assert_ne!(component, std::path::Component::ParentDir);
        }
    }
}
