#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Dependency verification guard
//!
//! Compares the dependencies currently present in a build against the
//! checksums approved in an earlier run. [`Verifier`] fails with
//! [`VerifyError::DependenciesChanged`](retrial_errors::VerifyError) when the
//! two diverge; [`Recorder`] approves the current state.

mod builder;
mod diff;
mod hashing;
mod recorder;
mod reporter;
mod types;
mod verifier;

pub use builder::GuardBuilder;
pub use diff::diff;
pub use hashing::hash_all;
pub use recorder::Recorder;
pub use reporter::{NullReporter, ResultReporter};
pub use types::{RecordSummary, VerificationSummary};
pub use verifier::Verifier;
