//! JSON file backed saved dependency store

use crate::database::{ChecksumDatabase, VersionProbe, FORMAT_VERSION};
use crate::SavedDependencyStore;
use async_trait::async_trait;
use retrial_errors::{Error, StorageError};
use retrial_types::{Checksums, SavedDependency};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// Reads and writes the checksum database at a fixed path
#[derive(Debug, Clone)]
pub struct FileSavedDependencyStore {
    path: PathBuf,
}

impl FileSavedDependencyStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the database, or `None` when it does not exist yet
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not parse.
    pub async fn load(&self) -> Result<Option<ChecksumDatabase>, Error> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::read_failed(&e, &self.path).into()),
        };

        let probe: VersionProbe =
            serde_json::from_str(&contents).map_err(|e| self.corrupted(&e))?;
        if probe.format_version != FORMAT_VERSION {
            return Err(StorageError::UnsupportedFormat {
                path: self.path.display().to_string(),
                found: probe.format_version,
                expected: FORMAT_VERSION,
            }
            .into());
        }

        let database: ChecksumDatabase =
            serde_json::from_str(&contents).map_err(|e| self.corrupted(&e))?;
        Ok(Some(database))
    }

    fn corrupted(&self, err: &serde_json::Error) -> StorageError {
        StorageError::CorruptedDatabase {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }

    async fn write_atomically(&self, contents: &[u8]) -> Result<(), Error> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .await
            .map_err(|e| StorageError::write_failed(&e, &parent))?;

        let temp_path = parent.join(format!(".{}.tmp", Uuid::new_v4()));

        if let Err(e) = fs::write(&temp_path, contents).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::write_failed(&e, &temp_path).into());
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::AtomicRenameFailed {
                message: format!(
                    "{} -> {}: {e}",
                    temp_path.display(),
                    self.path.display()
                ),
            }
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl SavedDependencyStore for FileSavedDependencyStore {
    async fn get(&self) -> Result<Vec<SavedDependency>, Error> {
        let Some(database) = self.load().await? else {
            debug!(path = %self.path.display(), "checksum database not found, saved set is empty");
            return Ok(Vec::new());
        };

        debug!(
            path = %self.path.display(),
            count = database.dependencies.len(),
            "loaded checksum database"
        );

        Ok(database
            .dependencies
            .into_iter()
            .map(|(key, hash)| SavedDependency::new(key, hash))
            .collect())
    }

    async fn save(&self, checksums: &Checksums) -> Result<(), Error> {
        let database = ChecksumDatabase::new(checksums.clone());
        let mut json = serde_json::to_string_pretty(&database)?;
        json.push('\n');

        self.write_atomically(json.as_bytes()).await?;

        info!(
            path = %self.path.display(),
            count = checksums.len(),
            "wrote checksum database"
        );
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_database_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileSavedDependencyStore::new(dir.path().join("absent.json"));

        assert!(store.load().await.unwrap().is_none());
        assert!(store.get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("db.json");
        let store = FileSavedDependencyStore::new(&path);

        store.save(&Checksums::new()).await.unwrap();

        assert!(path.exists());
        let database = store.load().await.unwrap().unwrap();
        assert_eq!(database.format_version, FORMAT_VERSION);
        assert!(database.recorded_at.is_some());
        assert!(database.dependencies.is_empty());

        // Only the database itself is left behind.
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }
}
