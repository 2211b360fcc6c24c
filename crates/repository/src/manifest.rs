//! Dependencies listed explicitly in a TOML manifest

use crate::{ensure_unique, LiveDependencySource};
use async_trait::async_trait;
use retrial_errors::{DiscoveryError, Error};
use retrial_types::{DependencyKey, LiveDependency};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Parsed dependency manifest
///
/// ```toml
/// [[dependency]]
/// group = "com.example"
/// name = "lib"
/// version = "1.0"
/// path = "libs/lib-1.0.jar"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    #[serde(rename = "dependency", default)]
    pub dependencies: Vec<ManifestEntry>,
}

/// One `[[dependency]]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub group: String,
    pub name: String,
    pub version: String,
    /// Artifact path, relative to the manifest's directory unless absolute
    pub path: PathBuf,
}

impl DependencyManifest {
    /// Parse manifest text
    ///
    /// # Errors
    /// Returns an error if the text is not a valid manifest.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, Error> {
        toml::from_str(contents).map_err(|e| {
            DiscoveryError::InvalidManifest {
                path: origin.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Resolve entries into live dependencies, relative to `base_dir`
    ///
    /// # Errors
    /// Returns an error if an entry has an invalid coordinate or a key repeats.
    pub fn into_live_dependencies(
        self,
        base_dir: &Path,
        origin: &Path,
    ) -> Result<Vec<LiveDependency>, Error> {
        let dependencies = self
            .dependencies
            .into_iter()
            .map(|entry| -> Result<LiveDependency, Error> {
                let key = DependencyKey::new(entry.group, entry.name, entry.version).map_err(
                    |e| DiscoveryError::InvalidManifest {
                        path: origin.display().to_string(),
                        message: e.to_string(),
                    },
                )?;
                let file = if entry.path.is_absolute() {
                    entry.path
                } else {
                    base_dir.join(entry.path)
                };
                Ok(LiveDependency::new(key, file))
            })
            .collect::<Result<Vec<_>, _>>()?;

        ensure_unique(&dependencies)?;
        Ok(dependencies)
    }
}

/// Live dependencies read from a manifest file
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LiveDependencySource for ManifestSource {
    async fn get(&self) -> Result<Vec<LiveDependency>, Error> {
        let contents = fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::from(DiscoveryError::ManifestNotFound {
                    path: self.path.display().to_string(),
                })
            } else {
                Error::io_with_path(&e, &self.path)
            }
        })?;

        let base_dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let dependencies = DependencyManifest::parse(&contents, &self.path)?
            .into_live_dependencies(&base_dir, &self.path)?;

        debug!(
            manifest = %self.path.display(),
            count = dependencies.len(),
            "read dependency manifest"
        );
        Ok(dependencies)
    }
}
