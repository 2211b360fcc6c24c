//! Builder wiring collaborators into a `Verifier` or `Recorder`

use crate::recorder::Recorder;
use crate::reporter::ResultReporter;
use crate::verifier::Verifier;
use retrial_errors::{Error, VerifyError};
use retrial_events::EventSender;
use retrial_hash::{HashGenerator, Sha512HashGenerator};
use retrial_repository::LiveDependencySource;
use retrial_store::SavedDependencyStore;
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Collects the collaborators shared by [`Verifier`] and [`Recorder`]
pub struct GuardBuilder {
    live: Option<Arc<dyn LiveDependencySource>>,
    saved: Option<Arc<dyn SavedDependencyStore>>,
    generator: Arc<dyn HashGenerator>,
    reporter: Option<Arc<dyn ResultReporter>>,
    max_concurrency: usize,
    tx: Option<EventSender>,
    run_id: Option<Uuid>,
}

impl GuardBuilder {
    /// Create a builder using the SHA-512 generator
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: None,
            saved: None,
            generator: Arc::new(Sha512HashGenerator::new()),
            reporter: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            tx: None,
            run_id: None,
        }
    }

    #[must_use]
    pub fn with_live_source(mut self, live: Arc<dyn LiveDependencySource>) -> Self {
        self.live = Some(live);
        self
    }

    #[must_use]
    pub fn with_saved_store(mut self, saved: Arc<dyn SavedDependencyStore>) -> Self {
        self.saved = Some(saved);
        self
    }

    #[must_use]
    pub fn with_hash_generator(mut self, generator: Arc<dyn HashGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Set the reporter; required for [`Self::build_verifier`]
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ResultReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Maximum number of files hashed at once
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Tag emitted events with `run_id` instead of a fresh id
    #[must_use]
    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Build a verifier
    ///
    /// # Errors
    ///
    /// Returns an error if the live source, saved store or reporter is missing.
    pub fn build_verifier(self) -> Result<Verifier, Error> {
        let live = required(self.live, "LiveDependencySource")?;
        let saved = required(self.saved, "SavedDependencyStore")?;
        let reporter = required(self.reporter, "ResultReporter")?;

        Ok(Verifier {
            live,
            saved,
            generator: self.generator,
            reporter,
            max_concurrency: self.max_concurrency,
            tx: self.tx,
            run_id: self.run_id.unwrap_or_else(Uuid::new_v4),
        })
    }

    /// Build a recorder
    ///
    /// # Errors
    ///
    /// Returns an error if the live source or saved store is missing.
    pub fn build_recorder(self) -> Result<Recorder, Error> {
        let live = required(self.live, "LiveDependencySource")?;
        let saved = required(self.saved, "SavedDependencyStore")?;

        Ok(Recorder {
            live,
            saved,
            generator: self.generator,
            max_concurrency: self.max_concurrency,
            tx: self.tx,
            run_id: self.run_id.unwrap_or_else(Uuid::new_v4),
        })
    }
}

impl Default for GuardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn required<T>(component: Option<T>, name: &str) -> Result<T, Error> {
    component.ok_or_else(|| {
        VerifyError::MissingComponent {
            component: name.to_string(),
        }
        .into()
    })
}
