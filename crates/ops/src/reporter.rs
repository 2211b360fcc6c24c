//! Result reporter that publishes outcomes on the event channel

use async_trait::async_trait;
use retrial_errors::Error;
use retrial_events::{EventEmitter, EventSender, VerificationEvent};
use retrial_guard::{ResultReporter, VerificationSummary};
use retrial_types::DependencyDiff;
use uuid::Uuid;

/// Turns verification outcomes into `VerificationEvent`s for the CLI to render
pub struct EventReporter {
    tx: EventSender,
    run_id: Uuid,
}

impl EventReporter {
    #[must_use]
    pub fn new(tx: EventSender, run_id: Uuid) -> Self {
        Self { tx, run_id }
    }
}

#[async_trait]
impl ResultReporter for EventReporter {
    async fn report_success(&self, summary: &VerificationSummary) -> Result<(), Error> {
        self.tx.emit_verification(VerificationEvent::Succeeded {
            run_id: self.run_id,
            verified: summary.verified,
            duration_ms: summary.duration_ms(),
        });
        Ok(())
    }

    async fn report_failure(&self, diff: &DependencyDiff) -> Result<(), Error> {
        self.tx.emit_verification(VerificationEvent::Failed {
            run_id: self.run_id,
            diff: diff.clone(),
        });
        Ok(())
    }
}
