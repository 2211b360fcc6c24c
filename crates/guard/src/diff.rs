//! Classification of live checksums against saved ones

use retrial_types::{Checksums, DependencyDiff, HashDiff};

/// Compare live checksums with saved ones.
///
/// Keys only in `live` are additional, keys only in `saved` are missing, and
/// keys in both with different hashes are changed (expected is the saved
/// hash, actual the live one). Keys with equal hashes appear nowhere.
#[must_use]
pub fn diff(live: &Checksums, saved: &Checksums) -> DependencyDiff {
    let mut result = DependencyDiff::default();

    for (key, actual) in live {
        match saved.get(key) {
            None => {
                result.additional_dependencies.insert(key.clone());
            }
            Some(expected) if expected != actual => {
                result
                    .changed_dependencies
                    .insert(key.clone(), HashDiff::new(expected.clone(), actual.clone()));
            }
            Some(_) => {}
        }
    }

    result.missing_dependencies.extend(
        saved
            .keys()
            .filter(|key| !live.contains_key(*key))
            .cloned(),
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrial_types::{DependencyKey, Sha512Hash};

    fn key(name: &str) -> DependencyKey {
        DependencyKey::new("g", name, "1").unwrap()
    }

    fn hash(c: char) -> Sha512Hash {
        Sha512Hash::from_hex(&c.to_string().repeat(128)).unwrap()
    }

    #[test]
    fn test_empty_sets() {
        assert!(diff(&Checksums::new(), &Checksums::new()).is_empty());
    }

    #[test]
    fn test_each_category() {
        let live: Checksums = [(key("a"), hash('1')), (key("c"), hash('3'))].into();
        let saved: Checksums = [(key("b"), hash('2')), (key("c"), hash('4'))].into();

        let result = diff(&live, &saved);
        assert_eq!(result.additional_dependencies, [key("a")].into());
        assert_eq!(result.missing_dependencies, [key("b")].into());
        assert_eq!(
            result.changed_dependencies,
            [(key("c"), HashDiff::new(hash('4'), hash('3')))].into()
        );
    }

    #[test]
    fn test_equal_hashes_are_omitted() {
        let both: Checksums = [(key("a"), hash('1'))].into();
        assert!(diff(&both, &both.clone()).is_empty());
    }
}
