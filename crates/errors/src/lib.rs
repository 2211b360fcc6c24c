#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for retrial
//!
//! One enum per concern (hashing, the checksum database, dependency
//! discovery, configuration, verification), all folded into [`Error`].
//! Everything is `Clone` so errors can travel inside events.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod discovery;
pub mod hash;
pub mod storage;
pub mod verify;

pub use config::ConfigError;
pub use discovery::DiscoveryError;
pub use hash::HashError;
pub use storage::StorageError;
pub use verify::VerifyError;

/// Error returned across crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Verify(#[from] VerifyError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

impl Error {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// I/O failure on a known file
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }

    /// True when the run failed because dependencies diverged, as opposed to
    /// the tooling itself failing
    #[must_use]
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::Verify(VerifyError::DependenciesChanged { .. }))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// What the CLI prints for an error: message, hint, retry advice and a
/// stable dotted code such as `verify.dependencies_changed`
pub trait UserFacingError {
    fn user_message(&self) -> Cow<'_, str>;

    /// Next step the user can take, if there is an obvious one
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// True for transient failures (locked or vanished files)
    fn is_retryable(&self) -> bool {
        false
    }

    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Hash(err) => err.user_message(),
            Error::Storage(err) => err.user_message(),
            Error::Discovery(err) => err.user_message(),
            Error::Verify(err) => err.user_message(),
            Error::Io { message, .. } => Cow::Owned(message.clone()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Hash(err) => err.user_hint(),
            Error::Storage(err) => err.user_hint(),
            Error::Discovery(err) => err.user_hint(),
            Error::Verify(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Storage(err) => err.is_retryable(),
            Error::Hash(err) => err.is_retryable(),
            Error::Io { .. } => true,
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Hash(err) => err.user_code(),
            Error::Storage(err) => err.user_code(),
            Error::Discovery(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Verify(err) => err.user_code(),
            Error::Internal(_) => Some("error.internal"),
            Error::Io { .. } => Some("error.io"),
        }
    }
}
