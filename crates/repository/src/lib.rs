#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Live dependency discovery for retrial
//!
//! A live source enumerates the dependencies currently present in the build
//! together with the file backing each one. Two sources are provided: an
//! explicit TOML manifest and a scan of a Maven-layout artifact directory.

mod layout;
mod manifest;

pub use layout::RepositoryLayoutSource;
pub use manifest::{DependencyManifest, ManifestEntry, ManifestSource};

use async_trait::async_trait;
use retrial_errors::{DiscoveryError, Error};
use retrial_types::{DependencyKey, LiveDependency};
use std::collections::HashMap;
use std::path::PathBuf;

/// Source of the dependencies currently present in the build
#[async_trait]
pub trait LiveDependencySource: Send + Sync {
    /// Return a materialized snapshot of live dependencies.
    ///
    /// # Errors
    /// Returns an error if the listing cannot be read or names a key twice.
    async fn get(&self) -> Result<Vec<LiveDependency>, Error>;
}

/// Reject a listing in which two files claim the same key
///
/// # Errors
/// Returns [`DiscoveryError::DuplicateDependency`] naming both files.
pub fn ensure_unique(dependencies: &[LiveDependency]) -> Result<(), Error> {
    let mut seen: HashMap<&DependencyKey, &PathBuf> = HashMap::new();
    for dependency in dependencies {
        if let Some(first) = seen.insert(&dependency.key, &dependency.file) {
            return Err(DiscoveryError::DuplicateDependency {
                key: dependency.key.to_string(),
                first: first.display().to_string(),
                second: dependency.file.display().to_string(),
            }
            .into());
        }
    }
    Ok(())
}
