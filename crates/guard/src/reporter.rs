//! Reporting seam for verification outcomes

use crate::types::VerificationSummary;
use async_trait::async_trait;
use retrial_errors::Error;
use retrial_types::DependencyDiff;

/// Receives the outcome of a verification run
///
/// Exactly one of the two methods is awaited per run that reaches the
/// comparison step. Runs that fail earlier (fetch or hash errors) report
/// nothing.
#[async_trait]
pub trait ResultReporter: Send + Sync {
    /// Every live dependency matched the saved set.
    ///
    /// # Errors
    /// Returns an error if the outcome cannot be delivered.
    async fn report_success(&self, summary: &VerificationSummary) -> Result<(), Error>;

    /// Live dependencies diverged from the saved set.
    ///
    /// # Errors
    /// Returns an error if the outcome cannot be delivered.
    async fn report_failure(&self, diff: &DependencyDiff) -> Result<(), Error>;
}

/// Reporter that discards every outcome
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

#[async_trait]
impl ResultReporter for NullReporter {
    async fn report_success(&self, _summary: &VerificationSummary) -> Result<(), Error> {
        Ok(())
    }

    async fn report_failure(&self, _diff: &DependencyDiff) -> Result<(), Error> {
        Ok(())
    }
}
