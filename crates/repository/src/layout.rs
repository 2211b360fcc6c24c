//! Dependencies discovered from a Maven-layout artifact directory

use crate::{ensure_unique, LiveDependencySource};
use async_trait::async_trait;
use retrial_errors::{DiscoveryError, Error};
use retrial_types::{DependencyKey, LiveDependency};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Scans `<group as path>/<name>/<version>/<name>-<version>.<ext>`
#[derive(Debug, Clone)]
pub struct RepositoryLayoutSource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl RepositoryLayoutSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }

    /// Map a path relative to the root onto a dependency key, if it follows
    /// the layout and carries one of the accepted extensions
    #[must_use]
    pub fn key_for(&self, relative: &Path) -> Option<DependencyKey> {
        let parts: Vec<&str> = relative
            .components()
            .map(|component| match component {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;

        // At least one group segment, then name, version and file name.
        let [group @ .., name, version, file_name] = parts.as_slice() else {
            return None;
        };
        if group.is_empty() {
            return None;
        }

        let stem = format!("{name}-{version}.");
        let extension = file_name.strip_prefix(&stem)?;
        if !self.extensions.iter().any(|accepted| accepted == extension) {
            return None;
        }

        DependencyKey::new(group.join("."), *name, *version).ok()
    }

    fn scan(&self) -> Result<Vec<LiveDependency>, Error> {
        let mut dependencies = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| DiscoveryError::ScanFailed {
                path: e
                    .path()
                    .unwrap_or(&self.root)
                    .display()
                    .to_string(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            match self.key_for(relative) {
                Some(key) => dependencies.push(LiveDependency::new(key, entry.path())),
                None => debug!(path = %relative.display(), "skipping file outside repository layout"),
            }
        }

        Ok(dependencies)
    }
}

#[async_trait]
impl LiveDependencySource for RepositoryLayoutSource {
    async fn get(&self) -> Result<Vec<LiveDependency>, Error> {
        let is_dir = tokio::fs::metadata(&self.root)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(DiscoveryError::RepositoryNotFound {
                path: self.root.display().to_string(),
            }
            .into());
        }

        let source = self.clone();
        let dependencies = tokio::task::spawn_blocking(move || source.scan())
            .await
            .map_err(|e| Error::internal(format!("repository scan task failed: {e}")))??;

        ensure_unique(&dependencies)?;

        debug!(
            repository = %self.root.display(),
            count = dependencies.len(),
            "scanned dependency repository"
        );
        Ok(dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> RepositoryLayoutSource {
        RepositoryLayoutSource::new("/repo", vec!["jar".to_string(), "aar".to_string()])
    }

    #[test]
    fn test_key_for_layout_path() {
        let key = source()
            .key_for(Path::new("com/example/lib/1.0/lib-1.0.jar"))
            .unwrap();
        assert_eq!(key.to_string(), "com.example:lib:1.0");
    }

    #[test]
    fn test_single_segment_group() {
        let key = source()
            .key_for(Path::new("junit/junit/4.13.2/junit-4.13.2.jar"))
            .unwrap();
        assert_eq!(key.to_string(), "junit:junit:4.13.2");
    }

    #[test]
    fn test_non_artifacts_are_skipped() {
        let source = source();
        assert!(source
            .key_for(Path::new("com/example/lib/1.0/lib-1.0.pom"))
            .is_none());
        assert!(source
            .key_for(Path::new("com/example/lib/1.0/lib-1.0.jar.sha1"))
            .is_none());
        assert!(source
            .key_for(Path::new("com/example/lib/1.0/lib-1.0-sources.jar"))
            .is_none());
        assert!(source.key_for(Path::new("lib/1.0/lib-1.0.jar")).is_none());
        assert!(source.key_for(Path::new("lib-1.0.jar")).is_none());
    }
}
