//! Content hashing error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum HashError {
    #[error("cannot calculate hash for empty file: {path}")]
    EmptyFile { path: String },

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },
}

impl HashError {
    /// Convert an `io::Error` into a `HashError` with an associated path
    #[must_use]
    pub fn from_io_with_path(err: &std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound {
                path: path.display().to_string(),
            },
            _ => Self::ReadFailed {
                path: path.display().to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl UserFacingError for HashError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::EmptyFile { .. } => {
                Some("A zero-length artifact is never valid; re-download or rebuild the dependency.")
            }
            Self::FileNotFound { .. } => {
                Some("Check that the dependency listing points at files that exist.")
            }
            Self::ReadFailed { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::ReadFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::EmptyFile { .. } => "hash.empty_file",
            Self::FileNotFound { .. } => "hash.file_not_found",
            Self::ReadFailed { .. } => "hash.read_failed",
        };
        Some(code)
    }
}
