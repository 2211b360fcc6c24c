use serde::{Deserialize, Serialize};

use retrial_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code, when the error carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod general;
pub mod verification;

pub use general::GeneralEvent;
pub use verification::VerificationEvent;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operation lifecycle)
    General(GeneralEvent),

    /// Dependency verification and recording
    Verification(VerificationEvent),
}

impl AppEvent {
    /// Severity used when mirroring the event into `tracing`
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            AppEvent::General(GeneralEvent::DebugLog { .. })
            | AppEvent::Verification(VerificationEvent::DependencyHashed { .. }) => Level::DEBUG,
            AppEvent::General(GeneralEvent::Warning { .. }) => Level::WARN,
            AppEvent::General(GeneralEvent::OperationFailed { .. })
            | AppEvent::Verification(VerificationEvent::Failed { .. }) => Level::ERROR,
            _ => Level::INFO,
        }
    }
}
