#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Saved dependency storage for retrial
//!
//! The saved set is the list of dependencies, with their checksums, that were
//! last approved. Verification only ever reads it; the separate record
//! operation replaces it.

mod database;
mod file_store;

pub use database::{ChecksumDatabase, FORMAT_VERSION};
pub use file_store::FileSavedDependencyStore;

use async_trait::async_trait;
use retrial_errors::Error;
use retrial_types::{Checksums, SavedDependency};
use std::path::Path;

/// Source of the approved dependency set
#[async_trait]
pub trait SavedDependencyStore: Send + Sync {
    /// Fetch every saved dependency.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or is corrupt.
    async fn get(&self) -> Result<Vec<SavedDependency>, Error>;

    /// Replace the saved set with `checksums`.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    async fn save(&self, checksums: &Checksums) -> Result<(), Error>;

    /// Where the saved set lives, for stores backed by a file
    fn location(&self) -> Option<&Path> {
        None
    }
}
