//! Checksum database error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("failed to read checksum database {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("failed to write checksum database {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("corrupted checksum database {path}: {message}")]
    CorruptedDatabase { path: String, message: String },

    #[error("unsupported checksum database format version {found} in {path} (expected {expected})")]
    UnsupportedFormat {
        path: String,
        found: u32,
        expected: u32,
    },

    #[error("atomic rename failed: {message}")]
    AtomicRenameFailed { message: String },
}

impl StorageError {
    /// Convert a read-side `io::Error` into a `StorageError` with an associated path
    #[must_use]
    pub fn read_failed(err: &std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => Self::ReadFailed {
                path: path.display().to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Convert a write-side `io::Error` into a `StorageError` with an associated path
    #[must_use]
    pub fn write_failed(err: &std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => Self::WriteFailed {
                path: path.display().to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl UserFacingError for StorageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied { .. } => {
                Some("Adjust filesystem permissions on the checksum database and retry.")
            }
            Self::CorruptedDatabase { .. } | Self::UnsupportedFormat { .. } => Some(
                "Restore the checksum database from version control or run `retrial record` to recreate it.",
            ),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ReadFailed { .. } | Self::WriteFailed { .. } | Self::AtomicRenameFailed { .. }
        )
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::PermissionDenied { .. } => "storage.permission_denied",
            Self::ReadFailed { .. } => "storage.read_failed",
            Self::WriteFailed { .. } => "storage.write_failed",
            Self::CorruptedDatabase { .. } => "storage.corrupted_database",
            Self::UnsupportedFormat { .. } => "storage.unsupported_format",
            Self::AtomicRenameFailed { .. } => "storage.atomic_rename_failed",
        };
        Some(code)
    }
}
