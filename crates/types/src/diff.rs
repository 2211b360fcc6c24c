//! Structured result of comparing live dependencies with saved ones

use crate::{DependencyKey, Sha512Hash};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Expected and actual hash of a dependency whose content changed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashDiff {
    /// Hash recorded in the checksum database
    pub expected: Sha512Hash,
    /// Hash computed from the live file
    pub actual: Sha512Hash,
}

impl HashDiff {
    #[must_use]
    pub fn new(expected: Sha512Hash, actual: Sha512Hash) -> Self {
        Self { expected, actual }
    }
}

/// Classification of every key that differs between the live and saved sets.
///
/// A key appears in at most one of the three collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDiff {
    /// Present live, absent from the saved set
    pub additional_dependencies: BTreeSet<DependencyKey>,
    /// Present in the saved set, absent live
    pub missing_dependencies: BTreeSet<DependencyKey>,
    /// Present in both with differing hashes
    pub changed_dependencies: BTreeMap<DependencyKey, HashDiff>,
}

impl DependencyDiff {
    /// True when verification passes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.additional_dependencies.is_empty()
            && self.missing_dependencies.is_empty()
            && self.changed_dependencies.is_empty()
    }

    /// Total number of keys reported
    #[must_use]
    pub fn len(&self) -> usize {
        self.additional_dependencies.len()
            + self.missing_dependencies.len()
            + self.changed_dependencies.len()
    }

    /// One line per discrepancy, in a stable order
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.len());
        for key in &self.additional_dependencies {
            lines.push(format!("additional dependency: {key}"));
        }
        for key in &self.missing_dependencies {
            lines.push(format!("missing dependency: {key}"));
        }
        for (key, diff) in &self.changed_dependencies {
            lines.push(format!(
                "changed dependency: {key} (expected {}, actual {})",
                diff.expected, diff.actual
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> DependencyKey {
        DependencyKey::new("com.example", name, "1.0").unwrap()
    }

    fn hash(c: char) -> Sha512Hash {
        Sha512Hash::from_hex(&c.to_string().repeat(128)).unwrap()
    }

    #[test]
    fn test_default_is_empty() {
        let diff = DependencyDiff::default();
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
        assert!(diff.describe().is_empty());
    }

    #[test]
    fn test_describe_lists_every_entry() {
        let mut diff = DependencyDiff::default();
        diff.additional_dependencies.insert(key("a"));
        diff.missing_dependencies.insert(key("b"));
        diff.changed_dependencies
            .insert(key("c"), HashDiff::new(hash('1'), hash('2')));

        assert!(!diff.is_empty());
        assert_eq!(diff.len(), 3);

        let lines = diff.describe();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "additional dependency: com.example:a:1.0");
        assert_eq!(lines[1], "missing dependency: com.example:b:1.0");
        assert!(lines[2].starts_with("changed dependency: com.example:c:1.0 (expected 111"));
        assert!(lines[2].contains("actual 222"));
    }
}
