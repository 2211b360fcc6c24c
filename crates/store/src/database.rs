//! On-disk model of the checksum database

use chrono::{DateTime, Utc};
use retrial_types::Checksums;
use serde::{Deserialize, Serialize};

/// Current checksum database format
pub const FORMAT_VERSION: u32 = 1;

/// Serialized form of the saved dependency set.
///
/// `dependencies` maps `group:name:version` to the uppercase SHA-512 of the
/// artifact. Keys and hashes are validated while deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumDatabase {
    pub format_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dependencies: Checksums,
}

impl ChecksumDatabase {
    #[must_use]
    pub fn new(dependencies: Checksums) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            recorded_at: Some(Utc::now()),
            dependencies,
        }
    }
}

/// Only the version field, so an unknown format is reported as such rather
/// than as a parse failure of fields it may not have
#[derive(Debug, Deserialize)]
pub(crate) struct VersionProbe {
    pub format_version: u32,
}
