//! Structured logging integration for events
//!
//! Mirrors every `AppEvent` into a `tracing` record with structured fields,
//! so debug log files carry the same information the console shows.

use retrial_events::{AppEvent, GeneralEvent, VerificationEvent};
use tracing::{debug, error, info, warn};

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    match event {
        AppEvent::Verification(verification) => log_verification_event(verification),
        AppEvent::General(general) => log_general_event(general),
    }
}

fn log_verification_event(event: &VerificationEvent) {
    match event {
        VerificationEvent::Started { run_id, operation } => {
            info!(run_id = %run_id, operation = %operation, "Run started");
        }
        VerificationEvent::DependenciesFetched {
            run_id,
            live,
            saved,
        } => {
            info!(run_id = %run_id, live, saved, "Dependencies fetched");
        }
        VerificationEvent::DependencyHashed { run_id, key, hash } => {
            debug!(run_id = %run_id, dependency = %key, hash = %hash, "Dependency hashed");
        }
        VerificationEvent::Succeeded {
            run_id,
            verified,
            duration_ms,
        } => {
            info!(run_id = %run_id, verified, duration_ms, "Verification succeeded");
        }
        VerificationEvent::Failed { run_id, diff } => {
            error!(
                run_id = %run_id,
                additional = diff.additional_dependencies.len(),
                missing = diff.missing_dependencies.len(),
                changed = diff.changed_dependencies.len(),
                "Verification failed"
            );
            for line in diff.describe() {
                error!(run_id = %run_id, "{line}");
            }
        }
        VerificationEvent::Recorded {
            run_id,
            dependencies,
            path,
        } => {
            info!(
                run_id = %run_id,
                dependencies,
                path = ?path,
                "Checksums recorded"
            );
        }
    }
}

fn log_general_event(event: &GeneralEvent) {
    match event {
        GeneralEvent::Warning { message, context } => {
            warn!(context = ?context, "{message}");
        }
        GeneralEvent::DebugLog { message } => {
            debug!("{message}");
        }
        GeneralEvent::OperationStarted { operation } => {
            info!(operation = %operation, "Operation started");
        }
        GeneralEvent::OperationCompleted { operation, success } => {
            info!(operation = %operation, success, "Operation completed");
        }
        GeneralEvent::OperationFailed { operation, failure } => {
            if failure.retryable {
                warn!(
                    operation = %operation,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Operation failed (retryable)"
                );
            } else {
                error!(
                    operation = %operation,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Operation failed"
                );
            }
        }
    }
}
