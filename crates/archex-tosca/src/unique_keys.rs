//! Per-export key uniqueness
//!
//! Two entities may normalize to the same identifier ("Worker" twice). The
//! registry disambiguates silently: collisions get an `_N` suffix instead
//! of surfacing as errors. Scope is one export run.

use std::collections::HashSet;

/// Registry of document keys handed out during one export run
#[derive(Debug, Default)]
pub struct UniqueKeyRegistry {
    seen: HashSet<String>,
}

impl UniqueKeyRegistry {
    /// Create a new registry with no keys seen
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Return a key equal to or derived from `candidate` that no earlier
    /// call returned
    ///
    /// An unseen candidate is returned as-is. A seen candidate gets `_N`
    /// appended for the smallest positive N whose result is itself unseen
    /// (an entity named "Worker 1" may already occupy `worker_1`). The
    /// returned key is marked seen either way.
    pub fn ensure_unique(&mut self, candidate: String) -> String {
        if self.seen.insert(candidate.clone()) {
            return candidate;
        }
        let mut suffix = 1u32;
        loop {
            let disambiguated = format!("{candidate}_{suffix}");
            if self.seen.insert(disambiguated.clone()) {
                return disambiguated;
            }
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unseen_candidate_is_unchanged() {
        let mut registry = UniqueKeyRegistry::new();

        assert_eq!(registry.ensure_unique("worker".to_string()), "worker");
        assert_eq!(registry.ensure_unique("gateway".to_string()), "gateway");
    }

    #[test]
    fn test_collisions_get_counting_suffixes() {
        let mut registry = UniqueKeyRegistry::new();

        assert_eq!(registry.ensure_unique("worker".to_string()), "worker");
        assert_eq!(registry.ensure_unique("worker".to_string()), "worker_1");
        assert_eq!(registry.ensure_unique("worker".to_string()), "worker_2");
    }

    #[test]
    fn test_suffix_skips_occupied_keys() {
        let mut registry = UniqueKeyRegistry::new();

        assert_eq!(registry.ensure_unique("worker_1".to_string()), "worker_1");
        assert_eq!(registry.ensure_unique("worker".to_string()), "worker");
        // worker_1 is taken, so the next collision jumps to worker_2
        assert_eq!(registry.ensure_unique("worker".to_string()), "worker_2");
    }

    #[test]
    fn test_state_does_not_leak_between_registries() {
        let mut first = UniqueKeyRegistry::new();
        let mut second = UniqueKeyRegistry::new();

        assert_eq!(first.ensure_unique("worker".to_string()), "worker");
        assert_eq!(second.ensure_unique("worker".to_string()), "worker");
    }

    proptest! {
        #[test]
        fn prop_returned_keys_are_pairwise_distinct(
            candidates in proptest::collection::vec("[a-z_]{0,8}", 0..50)
        ) {
            let mut registry = UniqueKeyRegistry::new();
            let mut returned = HashSet::new();
            for candidate in candidates {
                prop_assert!(returned.insert(registry.ensure_unique(candidate)));
            }
        }
    }
}
