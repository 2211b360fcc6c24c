//! Outcomes of guard runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Result of a verification run in which nothing changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub run_id: Uuid,
    /// Number of dependencies whose hashes matched
    pub verified: usize,
    pub duration: Duration,
}

impl VerificationSummary {
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Result of approving the current live state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub run_id: Uuid,
    pub recorded: usize,
    /// Database the checksums were written to, when the store is file backed
    pub path: Option<PathBuf>,
    pub duration: Duration,
}
