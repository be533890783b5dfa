//! Exact content hash (SHA-1)
//!
//! Used as the fingerprint of resources too large to keep verbatim whose
//! content is unsuitable for a fuzzy digest. Any byte change produces a
//! different hash, so two exact hashes only ever match on identical content.

use crate::artifacts::resources::EXACT_HASH_LENGTH;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// 40-character lowercase hex SHA-1 of a resource's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExactHash(String);

impl ExactHash {
    /// Parse and validate a hash from its hex form
    ///
    /// # Arguments
    ///
    /// * `hash` - 40-character hexadecimal string (either case)
    pub fn try_parse(hash: String) -> anyhow::Result<Self> {
        if hash.len() != EXACT_HASH_LENGTH {
            return Err(anyhow::anyhow!("Invalid exact hash length: {}", hash.len()));
        }
        if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid exact hash characters: {}", hash));
        }
        Ok(Self(hash.to_ascii_lowercase()))
    }

    /// Hash a complete buffer
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);
        Self::from_hasher(hasher)
    }

    /// Finish a streaming SHA-1 computation
    pub fn from_hasher(hasher: Sha1) -> Self {
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Abbreviated form (first 7 characters)
    pub fn to_short_hash(&self) -> &str {
        &self.0[..7]
    }
}

impl AsRef<str> for ExactHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExactHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ExactHash {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        Self::try_parse(value)
    }
}

impl From<ExactHash> for String {
    fn from(hash: ExactHash) -> Self {
        hash.0
    }
}
