//! Approve the current live state

use crate::hashing::hash_all;
use crate::types::RecordSummary;
use retrial_errors::Error;
use retrial_events::{AppEvent, EventEmitter, EventSender, GeneralEvent, VerificationEvent};
use retrial_hash::HashGenerator;
use retrial_repository::LiveDependencySource;
use retrial_store::SavedDependencyStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};
use uuid::Uuid;

/// Hashes live dependencies and replaces the saved set with the result
pub struct Recorder {
    pub(crate) live: Arc<dyn LiveDependencySource>,
    pub(crate) saved: Arc<dyn SavedDependencyStore>,
    pub(crate) generator: Arc<dyn HashGenerator>,
    pub(crate) max_concurrency: usize,
    pub(crate) tx: Option<EventSender>,
    pub(crate) run_id: Uuid,
}

impl EventEmitter for Recorder {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl Recorder {
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Record checksums for every live dependency.
    ///
    /// Nothing is written unless every dependency hashes successfully.
    ///
    /// # Errors
    ///
    /// Returns discovery, hashing or storage errors.
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub async fn run(&self) -> Result<RecordSummary, Error> {
        let start = Instant::now();
        self.emit_verification(VerificationEvent::Started {
            run_id: self.run_id,
            operation: "record".to_string(),
        });

        let live = self.live.get().await?;
        if live.is_empty() {
            let message = "no live dependencies found, recording an empty checksum set";
            match self.saved.location() {
                Some(path) => self.emit(AppEvent::General(GeneralEvent::warning_with_context(
                    message,
                    path.display().to_string(),
                ))),
                None => self.emit_warning(message),
            }
        }
        let checksums = hash_all(
            &self.generator,
            live,
            self.max_concurrency,
            self.tx.as_ref(),
            self.run_id,
        )
        .await?;

        self.saved.save(&checksums).await?;

        let path = self.saved.location().map(std::path::Path::to_path_buf);
        info!(recorded = checksums.len(), "recorded dependency checksums");
        self.emit_verification(VerificationEvent::Recorded {
            run_id: self.run_id,
            dependencies: checksums.len(),
            path: path.clone(),
        });

        Ok(RecordSummary {
            run_id: self.run_id,
            recorded: checksums.len(),
            path,
            duration: start.elapsed(),
        })
    }
}
