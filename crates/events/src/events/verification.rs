use retrial_types::{DependencyDiff, DependencyKey, Sha512Hash};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Events emitted while verifying or recording dependency checksums.
///
/// Every event carries the id of the run that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VerificationEvent {
    /// A verify or record run began
    Started { run_id: Uuid, operation: String },

    /// Live and saved sets have both been fetched
    DependenciesFetched {
        run_id: Uuid,
        live: usize,
        saved: usize,
    },

    /// One live dependency finished hashing
    DependencyHashed {
        run_id: Uuid,
        key: DependencyKey,
        hash: Sha512Hash,
    },

    /// Every live dependency matched the saved set
    Succeeded {
        run_id: Uuid,
        verified: usize,
        duration_ms: u64,
    },

    /// Live dependencies diverged from the saved set
    Failed { run_id: Uuid, diff: DependencyDiff },

    /// The current live state was written to the checksum database
    Recorded {
        run_id: Uuid,
        dependencies: usize,
        path: Option<PathBuf>,
    },
}

impl VerificationEvent {
    /// Id of the run this event belongs to
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        match self {
            Self::Started { run_id, .. }
            | Self::DependenciesFetched { run_id, .. }
            | Self::DependencyHashed { run_id, .. }
            | Self::Succeeded { run_id, .. }
            | Self::Failed { run_id, .. }
            | Self::Recorded { run_id, .. } => *run_id,
        }
    }
}
