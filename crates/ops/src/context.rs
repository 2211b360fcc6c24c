//! Operations context for dependency injection

use retrial_config::{Config, SourceKind};
use retrial_errors::{Error, VerifyError};
use retrial_events::{EventEmitter, EventSender};
use retrial_guard::GuardBuilder;
use retrial_repository::{LiveDependencySource, ManifestSource, RepositoryLayoutSource};
use retrial_store::{FileSavedDependencyStore, SavedDependencyStore};
use std::sync::Arc;
use uuid::Uuid;

/// Everything an operation needs: configuration, the event channel and the
/// id that tags this run's events
pub struct OpsCtx {
    /// Effective configuration
    pub config: Config,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// Id shared by every event of this run
    pub run_id: Uuid,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

impl OpsCtx {
    /// Live source selected by `source.kind`
    #[must_use]
    pub fn live_source(&self) -> Arc<dyn LiveDependencySource> {
        match self.config.source.kind {
            SourceKind::Manifest => Arc::new(ManifestSource::new(self.config.manifest_path())),
            SourceKind::Repository => Arc::new(RepositoryLayoutSource::new(
                self.config.repository_path(),
                self.config.source.extensions.clone(),
            )),
        }
    }

    /// Checksum database at `paths.checksum_file`
    #[must_use]
    pub fn saved_store(&self) -> Arc<dyn SavedDependencyStore> {
        Arc::new(FileSavedDependencyStore::new(self.config.checksum_file()))
    }

    /// Guard builder preloaded with this context's collaborators
    #[must_use]
    pub fn guard_builder(&self) -> GuardBuilder {
        GuardBuilder::new()
            .with_live_source(self.live_source())
            .with_saved_store(self.saved_store())
            .with_max_concurrency(self.config.max_concurrency())
            .with_event_sender(self.tx.clone())
            .with_run_id(self.run_id)
    }
}

/// Builder for [`OpsCtx`]
#[derive(Default)]
pub struct OpsContextBuilder {
    config: Option<Config>,
    tx: Option<EventSender>,
    run_id: Option<Uuid>,
}

impl OpsContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    #[must_use]
    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if the event sender is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let tx = self.tx.ok_or_else(|| VerifyError::MissingComponent {
            component: "EventSender".to_string(),
        })?;

        Ok(OpsCtx {
            config: self.config.unwrap_or_default(),
            tx,
            run_id: self.run_id.unwrap_or_else(Uuid::new_v4),
        })
    }
}
