#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in retrial
//!
//! Library crates never print. Everything a user sees goes through events
//! that the CLI drains and renders, and that it mirrors into `tracing`.

pub mod events;
pub use events::{AppEvent, FailureContext, GeneralEvent, VerificationEvent};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Sending half of the run's event channel
pub type EventSender = UnboundedSender<AppEvent>;

/// Receiving half, owned by the CLI
pub type EventReceiver = UnboundedReceiver<AppEvent>;

/// Open an unbounded event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Anything that may hold an [`EventSender`].
///
/// Emitting without a sender, or after the receiver is gone, is a no-op:
/// a run never fails because nobody is listening.
pub trait EventEmitter {
    fn event_sender(&self) -> Option<&EventSender>;

    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            let _ = sender.send(event);
        }
    }

    fn emit_verification(&self, event: VerificationEvent) {
        self.emit(AppEvent::Verification(event));
    }

    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// `success` is false when the run finished but found a mismatch
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            success,
        }));
    }

    fn emit_operation_failed(&self, operation: impl Into<String>, failure: FailureContext) {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            failure,
        }));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}
