#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations for retrial
//!
//! This crate sits between the CLI and the library crates: it turns the
//! effective configuration into concrete collaborators, runs the guard and
//! publishes lifecycle events.

mod context;
mod operations;
mod reporter;
mod types;

pub use context::{OpsContextBuilder, OpsCtx};
pub use operations::{record, verify};
pub use reporter::EventReporter;
pub use types::{MismatchReport, RecordReport, VerifyReport};

use retrial_errors::Error;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OperationResult {
    /// Every live dependency matched the saved set
    Verified(VerifyReport),
    /// Live dependencies diverged from the saved set
    DependenciesChanged(MismatchReport),
    /// The current state was approved
    Recorded(RecordReport),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check if this is a success result
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::Verified(_) | OperationResult::Recorded(_) => true,
            OperationResult::DependenciesChanged(_) => false,
        }
    }
}
