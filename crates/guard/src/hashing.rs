//! Bounded concurrent hashing of live dependencies

use retrial_errors::{Error, VerifyError};
use retrial_events::{EventEmitter, EventSender, VerificationEvent};
use retrial_hash::HashGenerator;
use retrial_repository::ensure_unique;
use retrial_types::{Checksums, LiveDependency};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;
use uuid::Uuid;

/// Hash every dependency, at most `max_concurrency` at a time.
///
/// One task is spawned per dependency. The first failure is returned
/// unchanged and the remaining tasks are aborted; no partial result is
/// produced. A `max_concurrency` of zero is treated as one. Listings that
/// repeat a key are rejected before anything is hashed.
///
/// # Errors
/// Returns [`DiscoveryError::DuplicateDependency`](retrial_errors::DiscoveryError)
/// for a repeated key, the first hashing error, or
/// [`VerifyError::HashTaskFailed`] if a task panicked or was cancelled.
pub async fn hash_all(
    generator: &Arc<dyn HashGenerator>,
    dependencies: Vec<LiveDependency>,
    max_concurrency: usize,
    tx: Option<&EventSender>,
    run_id: Uuid,
) -> Result<Checksums, Error> {
    ensure_unique(&dependencies)?;

    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for dependency in dependencies {
        let generator = Arc::clone(generator);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| Error::internal(format!("hash semaphore closed: {e}")))?;
            let hash = generator.generate_hash(&dependency.file).await?;
            Ok::<_, Error>((dependency.key, hash))
        });
    }

    let mut checksums = Checksums::new();

    // Returning early drops the JoinSet, which aborts the remaining tasks.
    while let Some(joined) = tasks.join_next().await {
        let (key, hash) = joined.map_err(|e| VerifyError::HashTaskFailed {
            message: e.to_string(),
        })??;

        debug!(dependency = %key, hash = %hash.short(), "hashed dependency");
        if let Some(tx) = tx {
            tx.emit_verification(VerificationEvent::DependencyHashed {
                run_id,
                key: key.clone(),
                hash: hash.clone(),
            });
        }
        checksums.insert(key, hash);
    }

    Ok(checksums)
}
