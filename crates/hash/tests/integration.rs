//! Integration tests for hash crate

#[cfg(test)]
mod tests {
    use retrial_errors::{Error, HashError};
    use retrial_hash::*;
    use tempfile::tempdir;
    use tokio::fs;

    #[tokio::test]
    async fn test_same_content_same_hash() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.jar");
        let second = dir.path().join("second.jar");
        fs::write(&first, b"identical artifact bytes").await.unwrap();
        fs::write(&second, b"identical artifact bytes").await.unwrap();

        let generator = Sha512HashGenerator::new();
        let a = generator.generate_hash(&first).await.unwrap();
        let again = generator.generate_hash(&first).await.unwrap();
        let b = generator.generate_hash(&second).await.unwrap();

        assert_eq!(a, again);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 128);
        assert_eq!(a.as_str(), a.as_str().to_ascii_uppercase());
    }

    #[tokio::test]
    async fn test_single_byte_change_changes_hash() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lib.jar");
        let generator = Sha512HashGenerator::new();

        fs::write(&path, b"artifact-v1").await.unwrap();
        let before = generator.generate_hash(&path).await.unwrap();

        fs::write(&path, b"artifact-v2").await.unwrap();
        let after = generator.generate_hash(&path).await.unwrap();

        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.jar");
        fs::write(&path, b"").await.unwrap();

        let result = Sha512HashGenerator::new().generate_hash(&path).await;
        assert!(matches!(
            result,
            Err(Error::Hash(HashError::EmptyFile { .. }))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.jar");

        let result = Sha512HashGenerator::new().generate_hash(&path).await;
        assert!(matches!(
            result,
            Err(Error::Hash(HashError::FileNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_hashing() {
        let dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..16 {
            let path = dir.path().join(format!("dep-{i}.jar"));
            fs::write(&path, format!("content {i}")).await.unwrap();
            paths.push(path);
        }

        let generator = std::sync::Arc::new(Sha512HashGenerator::new());
        let mut handles = Vec::new();
        for path in paths.clone() {
            let generator = std::sync::Arc::clone(&generator);
            handles.push(tokio::spawn(
                async move { generator.generate_hash(&path).await },
            ));
        }

        let mut hashes = Vec::new();
        for handle in handles {
            hashes.push(handle.await.unwrap().unwrap());
        }

        for (path, hash) in paths.iter().zip(&hashes) {
            let expected = hash_bytes(&fs::read(path).await.unwrap()).unwrap();
            assert_eq!(&expected, hash);
        }
    }
}
