//! Reports returned to the CLI

use retrial_guard::{RecordSummary, VerificationSummary};
use retrial_types::DependencyDiff;
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// Outcome of `verify`
#[derive(Clone, Debug, Serialize)]
pub struct VerifyReport {
    pub run_id: Uuid,
    pub verified: usize,
    pub duration_ms: u64,
}

impl From<&VerificationSummary> for VerifyReport {
    fn from(summary: &VerificationSummary) -> Self {
        Self {
            run_id: summary.run_id,
            verified: summary.verified,
            duration_ms: summary.duration_ms(),
        }
    }
}

/// Outcome of `record`
#[derive(Clone, Debug, Serialize)]
pub struct RecordReport {
    pub run_id: Uuid,
    pub recorded: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub duration_ms: u64,
}

impl From<&RecordSummary> for RecordReport {
    fn from(summary: &RecordSummary) -> Self {
        Self {
            run_id: summary.run_id,
            recorded: summary.recorded,
            path: summary.path.clone(),
            duration_ms: u64::try_from(summary.duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Mismatch found by `verify`, in the shape printed for `--json`
#[derive(Clone, Debug, Serialize)]
pub struct MismatchReport {
    pub run_id: Uuid,
    #[serde(flatten)]
    pub diff: DependencyDiff,
}
