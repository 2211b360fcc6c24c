#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! SHA-512 content hashing for retrial
//!
//! Saved checksums are compared against freshly generated ones by string
//! equality, so the encoding produced here (uppercase hex of the SHA-512
//! digest) has to stay bit-for-bit stable.

use async_trait::async_trait;
use retrial_errors::{Error, HashError};
use retrial_types::Sha512Hash;
use sha2::{Digest, Sha512};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::trace;

/// Size of chunks for streaming hash computation
const CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Computes the content hash of a single file.
///
/// Each call is an independent unit of work with no shared mutable state, so
/// any number of calls may run concurrently.
#[async_trait]
pub trait HashGenerator: Send + Sync {
    /// Hash the full content of `file`.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or empty.
    async fn generate_hash(&self, file: &Path) -> Result<Sha512Hash, Error>;
}

/// Streams a file through SHA-512
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512HashGenerator;

impl Sha512HashGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HashGenerator for Sha512HashGenerator {
    async fn generate_hash(&self, file: &Path) -> Result<Sha512Hash, Error> {
        let metadata = tokio::fs::metadata(file)
            .await
            .map_err(|e| HashError::from_io_with_path(&e, file))?;

        // Zero-length artifacts are rejected rather than hashed.
        if metadata.len() == 0 {
            return Err(HashError::EmptyFile {
                path: file.display().to_string(),
            }
            .into());
        }

        let mut handle = File::open(file)
            .await
            .map_err(|e| HashError::from_io_with_path(&e, file))?;

        let mut hasher = Sha512::new();
        let mut buffer = vec![0; CHUNK_SIZE];
        let mut total_bytes = 0u64;

        loop {
            let n = handle
                .read(&mut buffer)
                .await
                .map_err(|e| HashError::from_io_with_path(&e, file))?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
            total_bytes += n as u64;
        }

        // Truncated between the metadata check and the read.
        if total_bytes == 0 {
            return Err(HashError::EmptyFile {
                path: file.display().to_string(),
            }
            .into());
        }

        let mut digest = [0u8; 64];
        digest.copy_from_slice(&hasher.finalize());
        trace!(path = %file.display(), bytes = total_bytes, "hashed file");
        Ok(Sha512Hash::from_digest(&digest))
    }
}

/// Compute the hash of a byte slice, with the same empty-input policy as
/// [`Sha512HashGenerator`]
///
/// # Errors
/// Returns an error if `data` is empty.
pub fn hash_bytes(data: &[u8]) -> Result<Sha512Hash, Error> {
    if data.is_empty() {
        return Err(HashError::EmptyFile {
            path: "<memory>".to_string(),
        }
        .into());
    }
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&Sha512::digest(data));
    Ok(Sha512Hash::from_digest(&digest))
}
