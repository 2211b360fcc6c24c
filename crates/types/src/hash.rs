//! SHA-512 content hash value type

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of hex characters in a SHA-512 digest
pub const SHA512_HEX_LEN: usize = 128;

/// A SHA-512 hash of some data.
///
/// The value is kept as uppercase hex. Saved hashes are compared against
/// freshly generated ones by string equality, so every constructor funnels
/// through the same normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sha512Hash {
    value: String,
}

impl Sha512Hash {
    /// Parse a hash from its hex representation, normalizing to uppercase.
    ///
    /// # Errors
    /// Returns an error if the input is not exactly 128 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();

        if trimmed.len() != SHA512_HEX_LEN {
            return Err(ParseError::InvalidHash {
                input: s.to_string(),
                reason: format!(
                    "expected {SHA512_HEX_LEN} hex characters, got {}",
                    trimmed.len()
                ),
            });
        }

        if let Some(bad) = trimmed.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidHash {
                input: s.to_string(),
                reason: format!("'{bad}' is not a hex digit"),
            });
        }

        Ok(Self {
            value: trimmed.to_ascii_uppercase(),
        })
    }

    /// Build a hash from raw digest bytes
    #[must_use]
    pub fn from_digest(bytes: &[u8; 64]) -> Self {
        Self {
            value: hex::encode_upper(bytes),
        }
    }

    /// The canonical (uppercase hex) value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// First characters of the hash, for compact display
    #[must_use]
    pub fn short(&self) -> &str {
        &self.value[..16]
    }
}

impl fmt::Display for Sha512Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Sha512Hash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Sha512Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for Sha512Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
