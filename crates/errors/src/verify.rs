//! Verification outcome error types

use std::borrow::Cow;

use crate::UserFacingError;
use retrial_types::DependencyDiff;
use thiserror::Error;

/// Errors emitted by the verification engine.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// Live dependencies diverged from the saved set. Carries the full diff.
    #[error(
        "dependency verification failed: {} additional, {} missing, {} changed",
        .diff.additional_dependencies.len(),
        .diff.missing_dependencies.len(),
        .diff.changed_dependencies.len()
    )]
    DependenciesChanged { diff: Box<DependencyDiff> },

    /// A hashing task panicked or was cancelled before producing a result.
    #[error("hashing task failed: {message}")]
    HashTaskFailed { message: String },

    /// A verifier or recorder was built without a required collaborator.
    #[error("missing component: {component}")]
    MissingComponent { component: String },
}

impl VerifyError {
    /// The diff carried by a mismatch, if this is one
    #[must_use]
    pub fn diff(&self) -> Option<&DependencyDiff> {
        match self {
            Self::DependenciesChanged { diff } => Some(diff),
            Self::HashTaskFailed { .. } | Self::MissingComponent { .. } => None,
        }
    }
}

impl UserFacingError for VerifyError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DependenciesChanged { .. } => Some(
                "Review the changes; if they are expected, run `retrial record` to approve them.",
            ),
            Self::HashTaskFailed { .. } | Self::MissingComponent { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::DependenciesChanged { .. } => "verify.dependencies_changed",
            Self::HashTaskFailed { .. } => "verify.hash_task_failed",
            Self::MissingComponent { .. } => "verify.missing_component",
        };
        Some(code)
    }
}
