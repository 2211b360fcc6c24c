//! Integration tests for the checksum database store

#[cfg(test)]
mod tests {
    use retrial_errors::{Error, StorageError};
    use retrial_store::*;
    use retrial_types::{Checksums, DependencyKey, SavedDependency, Sha512Hash};
    use tempfile::tempdir;
    use tokio::fs;

    fn hash(c: char) -> Sha512Hash {
        Sha512Hash::from_hex(&c.to_string().repeat(128)).unwrap()
    }

    fn key(name: &str) -> DependencyKey {
        DependencyKey::new("com.example", name, "1.0").unwrap()
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let dir = tempdir().unwrap();
        let store = FileSavedDependencyStore::new(dir.path().join("retrial-checksums.json"));

        let mut checksums = Checksums::new();
        checksums.insert(key("b"), hash('b'));
        checksums.insert(key("a"), hash('a'));
        store.save(&checksums).await.unwrap();

        let mut saved = store.get().await.unwrap();
        saved.sort();
        assert_eq!(
            saved,
            vec![
                SavedDependency::new(key("a"), hash('a')),
                SavedDependency::new(key("b"), hash('b')),
            ]
        );
        assert_eq!(SavedDependency::into_checksums(saved), checksums);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_set() {
        let dir = tempdir().unwrap();
        let store = FileSavedDependencyStore::new(dir.path().join("db.json"));

        let mut first = Checksums::new();
        first.insert(key("old"), hash('1'));
        store.save(&first).await.unwrap();

        let mut second = Checksums::new();
        second.insert(key("new"), hash('2'));
        store.save(&second).await.unwrap();

        let saved = store.get().await.unwrap();
        assert_eq!(saved, vec![SavedDependency::new(key("new"), hash('2'))]);
    }

    #[tokio::test]
    async fn test_file_format_is_sorted_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        let store = FileSavedDependencyStore::new(&path);

        let mut checksums = Checksums::new();
        checksums.insert(key("zeta"), hash('f'));
        checksums.insert(key("alpha"), hash('e'));
        store.save(&checksums).await.unwrap();

        let text = fs::read_to_string(&path).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["format_version"], 1);
        assert_eq!(
            json["dependencies"]["com.example:alpha:1.0"],
            "E".repeat(128)
        );

        let alpha = text.find("com.example:alpha:1.0").unwrap();
        let zeta = text.find("com.example:zeta:1.0").unwrap();
        assert!(alpha < zeta);
    }

    #[tokio::test]
    async fn test_lowercase_hashes_are_normalized_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        let body = format!(
            r#"{{"format_version": 1, "dependencies": {{"com.example:a:1.0": "{}"}}}}"#,
            "ab".repeat(64)
        );
        fs::write(&path, body).await.unwrap();

        let saved = FileSavedDependencyStore::new(&path).get().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].hash.as_str(), "AB".repeat(64));
    }

    #[tokio::test]
    async fn test_malformed_json_is_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "{ not json").await.unwrap();

        let result = FileSavedDependencyStore::new(&path).get().await;
        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::CorruptedDatabase { .. }))
        ));
    }

    #[tokio::test]
    async fn test_invalid_hash_is_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(
            &path,
            r#"{"format_version": 1, "dependencies": {"com.example:a:1.0": "short"}}"#,
        )
        .await
        .unwrap();

        let result = FileSavedDependencyStore::new(&path).get().await;
        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::CorruptedDatabase { .. }))
        ));
    }

    #[tokio::test]
    async fn test_invalid_key_is_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        let body = format!(
            r#"{{"format_version": 1, "dependencies": {{"not-a-coordinate": "{}"}}}}"#,
            "a".repeat(128)
        );
        fs::write(&path, body).await.unwrap();

        let result = FileSavedDependencyStore::new(&path).get().await;
        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::CorruptedDatabase { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unknown_format_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, r#"{"format_version": 7, "recorded_at": "2026-10-17T12:00:00Z", "dependencies": {}}"#)
            .await
            .unwrap();

        let result = FileSavedDependencyStore::new(&path).get().await;
        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::UnsupportedFormat {
                found: 7,
                expected: 1,
                ..
            }))
        ));
    }
}
