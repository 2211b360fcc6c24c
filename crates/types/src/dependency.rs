//! Dependency coordinates and the live/saved views of a dependency

use crate::{ParseError, Sha512Hash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Key to hash mapping for one side of a comparison.
///
/// A map rather than a set of pairs so a key can never carry two hashes.
pub type Checksums = BTreeMap<DependencyKey, Sha512Hash>;

/// Identifies a dependency independently of its content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyKey {
    group: String,
    name: String,
    version: String,
}

impl DependencyKey {
    /// Create a key from its coordinate parts.
    ///
    /// # Errors
    /// Returns an error if any part is empty or contains a `:`.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let key = Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        };

        for (label, part) in [
            ("group", &key.group),
            ("name", &key.name),
            ("version", &key.version),
        ] {
            if part.is_empty() {
                return Err(ParseError::InvalidKey {
                    input: key.to_string(),
                    reason: format!("{label} is empty"),
                });
            }
            if part.contains(':') {
                return Err(ParseError::InvalidKey {
                    input: key.to_string(),
                    reason: format!("{label} must not contain ':'"),
                });
            }
        }

        Ok(key)
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl FromStr for DependencyKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, name, version] => Self::new(*group, *name, *version),
            _ => Err(ParseError::InvalidKey {
                input: s.to_string(),
                reason: format!(
                    "expected group:name:version, found {} part(s)",
                    parts.len()
                ),
            }),
        }
    }
}

impl Serialize for DependencyKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DependencyKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A dependency as currently present in the build, backed by a file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiveDependency {
    pub key: DependencyKey,
    pub file: PathBuf,
}

impl LiveDependency {
    #[must_use]
    pub fn new(key: DependencyKey, file: impl Into<PathBuf>) -> Self {
        Self {
            key,
            file: file.into(),
        }
    }
}

/// A previously approved dependency and its recorded hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SavedDependency {
    pub key: DependencyKey,
    pub hash: Sha512Hash,
}

impl SavedDependency {
    #[must_use]
    pub fn new(key: DependencyKey, hash: Sha512Hash) -> Self {
        Self { key, hash }
    }

    /// Collect saved dependencies into a key to hash map
    #[must_use]
    pub fn into_checksums(saved: impl IntoIterator<Item = SavedDependency>) -> Checksums {
        saved.into_iter().map(|dep| (dep.key, dep.hash)).collect()
    }
}
