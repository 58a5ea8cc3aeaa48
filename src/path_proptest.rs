//! Property-based tests for path manipulation functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{depth, is_ancestor_or_self, normalize, normalize_join, staged};
    use proptest::prelude::*;

    // ============================================================================
    // normalize_join property tests
    // ============================================================================

    proptest! {
        /// Property: the result is always absolute and free of doubled separators
        #[test]
        fn normalize_join_is_absolute_and_clean(
            base in "[a-z./]{0,20}",
            segments in prop::collection::vec("[a-z./]{0,12}", 0..4),
        ) {
            let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
            let result = normalize_join(&base, &segments);

            prop_assert!(result.starts_with('/'));
            prop_assert!(!result.contains("//"), "'{}' has a doubled separator", result);
            prop_assert!(result == "/" || !result.ends_with('/'));
            for component in result.split('/') {
                prop_assert!(component != "." && component != "..");
            }
        }

        /// Property: normalizing a normalized path changes nothing
        #[test]
        fn normalize_is_idempotent(path in "[a-z0-9./]{0,30}") {
            let once = normalize(&path);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        /// Property: an absolute segment never discards the base
        #[test]
        fn absolute_segment_keeps_base(
            base in "(/[a-z0-9]{1,6}){1,4}",
            segment in "(/[a-z0-9]{1,6}){1,4}",
        ) {
            let joined = normalize_join(&base, &[&segment]);
            prop_assert_eq!(joined.clone(), format!("{}{}", base, segment));
            prop_assert!(is_ancestor_or_self(&base, &joined));
        }
    }

    // ============================================================================
    // staged / depth property tests
    // ============================================================================

    proptest! {
        /// Property: staging adds exactly the staging root's depth
        #[test]
        fn staged_depth_is_additive(
            root in "(/[a-z0-9]{1,6}){0,4}",
            real in "(/[a-z0-9]{1,6}){0,4}",
        ) {
            let staged_path = staged(&root, &real);
            prop_assert_eq!(depth(&staged_path), depth(&root) + depth(&real));
        }

        /// Property: a path is never an ancestor of a strict prefix of itself
        #[test]
        fn ancestor_is_not_reversed(
            parent in "(/[a-z0-9]{1,6}){1,3}",
            child in "(/[a-z0-9]{1,6}){1,3}",
        ) {
            let longer = normalize_join(&parent, &[&child]);
            prop_assert!(!is_ancestor_or_self(&longer, &parent));
        }
    }
}
