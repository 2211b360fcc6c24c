//! Verification orchestrator

use crate::diff::diff;
use crate::hashing::hash_all;
use crate::reporter::ResultReporter;
use crate::types::VerificationSummary;
use retrial_errors::{Error, VerifyError};
use retrial_events::{EventEmitter, EventSender, VerificationEvent};
use retrial_hash::HashGenerator;
use retrial_repository::LiveDependencySource;
use retrial_store::SavedDependencyStore;
use retrial_types::SavedDependency;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Checks live dependencies against the saved set
///
/// Built with [`GuardBuilder`](crate::GuardBuilder). The verifier never
/// writes to the saved store.
pub struct Verifier {
    pub(crate) live: Arc<dyn LiveDependencySource>,
    pub(crate) saved: Arc<dyn SavedDependencyStore>,
    pub(crate) generator: Arc<dyn HashGenerator>,
    pub(crate) reporter: Arc<dyn ResultReporter>,
    pub(crate) max_concurrency: usize,
    pub(crate) tx: Option<EventSender>,
    pub(crate) run_id: Uuid,
}

impl EventEmitter for Verifier {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl Verifier {
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Run one verification.
    ///
    /// Fetches both sets concurrently, hashes every live dependency, then
    /// reports the outcome. A non-empty diff is reported through
    /// [`ResultReporter::report_failure`] before this returns
    /// [`VerifyError::DependenciesChanged`].
    ///
    /// # Errors
    ///
    /// Returns fetch and hash errors unchanged, reporter errors, or
    /// [`VerifyError::DependenciesChanged`] when the sets diverge.
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub async fn run(&self) -> Result<VerificationSummary, Error> {
        let start = Instant::now();
        self.emit_verification(VerificationEvent::Started {
            run_id: self.run_id,
            operation: "verify".to_string(),
        });

        let (saved, live) = tokio::try_join!(self.saved.get(), self.live.get())?;

        self.emit_verification(VerificationEvent::DependenciesFetched {
            run_id: self.run_id,
            live: live.len(),
            saved: saved.len(),
        });

        let saved = SavedDependency::into_checksums(saved);
        let live = hash_all(
            &self.generator,
            live,
            self.max_concurrency,
            self.tx.as_ref(),
            self.run_id,
        )
        .await?;

        let diff = diff(&live, &saved);

        if diff.is_empty() {
            let summary = VerificationSummary {
                run_id: self.run_id,
                verified: live.len(),
                duration: start.elapsed(),
            };
            info!(verified = summary.verified, "dependencies verified");
            self.reporter.report_success(&summary).await?;
            Ok(summary)
        } else {
            warn!(
                additional = diff.additional_dependencies.len(),
                missing = diff.missing_dependencies.len(),
                changed = diff.changed_dependencies.len(),
                "dependency verification failed"
            );
            self.reporter.report_failure(&diff).await?;
            Err(VerifyError::DependenciesChanged {
                diff: Box::new(diff),
            }
            .into())
        }
    }
}
