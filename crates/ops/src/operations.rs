//! `verify` and `record`

use crate::reporter::EventReporter;
use crate::types::{RecordReport, VerifyReport};
use crate::OpsCtx;
use retrial_errors::Error;
use retrial_events::{EventEmitter, FailureContext};
use std::sync::Arc;
use tracing::debug;

/// Verify live dependencies against the checksum database.
///
/// # Errors
///
/// Returns [`VerifyError::DependenciesChanged`](retrial_errors::VerifyError)
/// when the dependencies diverged, or any discovery, storage or hashing
/// error unchanged.
pub async fn verify(ctx: &OpsCtx) -> Result<VerifyReport, Error> {
    ctx.emit_operation_started("verify");
    debug!(
        run_id = %ctx.run_id,
        source = ?ctx.config.source.kind,
        checksum_file = %ctx.config.checksum_file().display(),
        "starting verification"
    );
    ctx.emit_debug(format!(
        "comparing against {}",
        ctx.config.checksum_file().display()
    ));

    let result = async {
        let verifier = ctx
            .guard_builder()
            .with_reporter(Arc::new(EventReporter::new(ctx.tx.clone(), ctx.run_id)))
            .build_verifier()?;
        verifier.run().await
    }
    .await;

    match result {
        Ok(summary) => {
            ctx.emit_operation_completed("verify", true);
            Ok(VerifyReport::from(&summary))
        }
        Err(err) => {
            // A mismatch was already published by the reporter.
            if err.is_verification_failure() {
                ctx.emit_operation_completed("verify", false);
            } else {
                ctx.emit_operation_failed("verify", FailureContext::from_error(&err));
            }
            Err(err)
        }
    }
}

/// Approve the current live dependencies by writing their checksums.
///
/// # Errors
///
/// Returns discovery, hashing or storage errors. Nothing is written unless
/// every dependency hashes.
pub async fn record(ctx: &OpsCtx) -> Result<RecordReport, Error> {
    ctx.emit_operation_started("record");
    debug!(
        run_id = %ctx.run_id,
        checksum_file = %ctx.config.checksum_file().display(),
        "starting record"
    );
    ctx.emit_debug(format!(
        "writing checksums to {}",
        ctx.config.checksum_file().display()
    ));

    let result = async { ctx.guard_builder().build_recorder()?.run().await }.await;

    match result {
        Ok(summary) => {
            ctx.emit_operation_completed("record", true);
            Ok(RecordReport::from(&summary))
        }
        Err(err) => {
            ctx.emit_operation_failed("record", FailureContext::from_error(&err));
            Err(err)
        }
    }
}
