//! Property tests for the dependency diff engine

use proptest::prelude::*;
use retrial_guard::diff;
use retrial_types::{Checksums, DependencyKey, Sha512Hash};
use std::collections::BTreeSet;

fn arb_key() -> impl Strategy<Value = DependencyKey> {
    ("[a-c]", "[a-e]", "[1-3]")
        .prop_map(|(group, name, version)| DependencyKey::new(group, name, version).unwrap())
}

fn arb_hash() -> impl Strategy<Value = Sha512Hash> {
    // A small alphabet so that shared keys often carry equal hashes.
    prop::sample::select(vec!['0', '7', 'A', 'F'])
        .prop_map(|c| Sha512Hash::from_hex(&c.to_string().repeat(128)).unwrap())
}

fn arb_checksums() -> impl Strategy<Value = Checksums> {
    prop::collection::btree_map(arb_key(), arb_hash(), 0..12)
}

proptest! {
    #[test]
    fn every_key_lands_in_exactly_one_place(live in arb_checksums(), saved in arb_checksums()) {
        let result = diff(&live, &saved);

        let all_keys: BTreeSet<_> = live.keys().chain(saved.keys()).cloned().collect();
        for key in &all_keys {
            let placements = usize::from(result.additional_dependencies.contains(key))
                + usize::from(result.missing_dependencies.contains(key))
                + usize::from(result.changed_dependencies.contains_key(key));

            let unchanged = matches!(
                (live.get(key), saved.get(key)),
                (Some(a), Some(b)) if a == b
            );
            prop_assert_eq!(placements, usize::from(!unchanged));
        }

        prop_assert_eq!(result.len(), result.additional_dependencies.len()
            + result.missing_dependencies.len()
            + result.changed_dependencies.len());
    }

    #[test]
    fn diff_with_itself_is_empty(set in arb_checksums()) {
        prop_assert!(diff(&set, &set).is_empty());
    }

    #[test]
    fn additions_and_removals_are_symmetric(live in arb_checksums(), saved in arb_checksums()) {
        let forward = diff(&live, &saved);
        let backward = diff(&saved, &live);

        prop_assert_eq!(&forward.additional_dependencies, &backward.missing_dependencies);
        prop_assert_eq!(&forward.missing_dependencies, &backward.additional_dependencies);

        for (key, change) in &forward.changed_dependencies {
            let reverse = &backward.changed_dependencies[key];
            prop_assert_eq!(&change.expected, &reverse.actual);
            prop_assert_eq!(&change.actual, &reverse.expected);
        }
    }

    #[test]
    fn changed_entries_carry_saved_then_live(live in arb_checksums(), saved in arb_checksums()) {
        for (key, change) in &diff(&live, &saved).changed_dependencies {
            prop_assert_eq!(&change.expected, &saved[key]);
            prop_assert_eq!(&change.actual, &live[key]);
            prop_assert_ne!(&change.expected, &change.actual);
        }
    }
}
