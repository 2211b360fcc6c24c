//! Live dependency discovery error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    #[error("dependency manifest not found: {path}")]
    ManifestNotFound { path: String },

    #[error("invalid dependency manifest {path}: {message}")]
    InvalidManifest { path: String, message: String },

    #[error("dependency repository not found: {path}")]
    RepositoryNotFound { path: String },

    #[error("failed to scan {path}: {message}")]
    ScanFailed { path: String, message: String },

    #[error("dependency {key} is listed more than once ({first} and {second})")]
    DuplicateDependency {
        key: String,
        first: String,
        second: String,
    },
}

impl UserFacingError for DiscoveryError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ManifestNotFound { .. } => {
                Some("Create the dependency manifest or point `source.manifest` at it.")
            }
            Self::RepositoryNotFound { .. } => {
                Some("Point `source.repository` at the directory holding resolved artifacts.")
            }
            Self::DuplicateDependency { .. } => {
                Some("Each group:name:version coordinate may appear only once.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ManifestNotFound { .. } => "discovery.manifest_not_found",
            Self::InvalidManifest { .. } => "discovery.invalid_manifest",
            Self::RepositoryNotFound { .. } => "discovery.repository_not_found",
            Self::ScanFailed { .. } => "discovery.scan_failed",
            Self::DuplicateDependency { .. } => "discovery.duplicate_dependency",
        };
        Some(code)
    }
}
