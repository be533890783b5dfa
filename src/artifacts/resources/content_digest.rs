use crate::artifacts::digest::{DigestBuilder, FuzzyDigest};
use crate::artifacts::resources::exact_hash::ExactHash;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::io::Read;
use tracing::debug;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Fingerprint of a single resource's content
///
/// Exactly one representation is kept per resource:
///
/// - `Raw`: the content itself, for content no larger than the raw size limit
/// - `Fuzzy`: a locality-sensitive digest, for larger content with enough variety
/// - `Exact`: a SHA-1 hash, when a fuzzy digest cannot be produced
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ContentDigest {
    Raw(Bytes),
    Fuzzy(FuzzyDigest),
    Exact(ExactHash),
}

impl ContentDigest {
    /// Fingerprint a complete buffer
    pub fn compute(content: &[u8], max_raw_size: u64) -> Self {
        let mut hasher = ContentHasher::new(max_raw_size);
        hasher.update(content);
        hasher.finish().0
    }

    /// Short label of the representation in use
    pub fn label(&self) -> &'static str {
        match self {
            ContentDigest::Raw(_) => "raw",
            ContentDigest::Fuzzy(_) => "tlsh",
            ContentDigest::Exact(_) => "sha1",
        }
    }

    pub fn as_fuzzy(&self) -> Option<&FuzzyDigest> {
        match self {
            ContentDigest::Fuzzy(digest) => Some(digest),
            ContentDigest::Raw(_) | ContentDigest::Exact(_) => None,
        }
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentDigest::Raw(content) => write!(f, "{}", String::from_utf8_lossy(content)),
            ContentDigest::Fuzzy(digest) => write!(f, "{}", digest.to_tagged_hex()),
            ContentDigest::Exact(hash) => write!(f, "{hash}"),
        }
    }
}

/// Streaming fingerprinter for one resource
///
/// Feeds every chunk to a fuzzy digest builder and a SHA-1 hasher, and keeps
/// a verbatim copy only while the content still fits the raw size limit.
#[derive(Debug, Clone)]
pub struct ContentHasher {
    max_raw_size: u64,
    raw: Option<Vec<u8>>,
    fuzzy: DigestBuilder,
    exact: Sha1,
    size: u64,
}

impl ContentHasher {
    pub fn new(max_raw_size: u64) -> Self {
        ContentHasher {
            max_raw_size,
            raw: Some(Vec::new()),
            fuzzy: DigestBuilder::new(),
            exact: Sha1::new(),
            size: 0,
        }
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.size += chunk.len() as u64;

        if self.size > self.max_raw_size {
            self.raw = None;
        } else if let Some(raw) = self.raw.as_mut() {
            raw.extend_from_slice(chunk);
        }

        self.fuzzy.update(chunk);
        self.exact.update(chunk);
    }

    /// Drain a reader into the hasher
    pub fn update_from_reader(&mut self, mut reader: impl Read) -> std::io::Result<()> {
        let mut buffer = vec![0u8; READ_CHUNK_SIZE];
        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                return Ok(());
            }
            self.update(&buffer[..read]);
        }
    }

    /// Pick the representation and report the total content size
    pub fn finish(self) -> (ContentDigest, u64) {
        if let Some(raw) = self.raw {
            return (ContentDigest::Raw(Bytes::from(raw)), self.size);
        }

        let digest = match self.fuzzy.finalize() {
            Ok(digest) => ContentDigest::Fuzzy(digest),
            Err(err) => {
                debug!(size = self.size, %err, "falling back to exact hash");
                ContentDigest::Exact(ExactHash::from_hasher(self.exact))
            }
        };

        (digest, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::script_blob;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const MAX_RAW: u64 = 512;

    #[test]
    fn small_content_is_kept_verbatim() {
        let digest = ContentDigest::compute(b"console.log(1)", MAX_RAW);
        assert_eq!(digest, ContentDigest::Raw(Bytes::from_static(b"console.log(1)")));
        assert_eq!(digest.label(), "raw");
    }

    #[test]
    fn content_at_the_limit_is_still_raw() {
        let content = script_blob(MAX_RAW as usize);
        assert!(matches!(
            ContentDigest::compute(&content, MAX_RAW),
            ContentDigest::Raw(_)
        ));
    }

    #[test]
    fn large_varied_content_gets_fuzzy_digest() {
        let content = script_blob(600);
        let digest = ContentDigest::compute(&content, MAX_RAW);

        let expected = DigestBuilder::from_bytes(&content).finalize().unwrap();
        assert_eq!(digest, ContentDigest::Fuzzy(expected));
        assert_eq!(digest.as_fuzzy(), Some(&expected));
    }

    #[test]
    fn large_uniform_content_falls_back_to_exact_hash() {
        let content = vec![b' '; 4096];
        let digest = ContentDigest::compute(&content, MAX_RAW);

        assert_eq!(digest, ContentDigest::Exact(ExactHash::of(&content)));
        assert_eq!(digest.as_fuzzy(), None);
    }

    #[rstest]
    #[case(0)]
    #[case(10)]
    #[case(49)]
    fn short_content_never_gets_fuzzy_digest(#[case] len: usize) {
        let content = script_blob(len);
        // force the non-raw path even for tiny content
        let digest = ContentDigest::compute(&content, 0);
        if len == 0 {
            assert!(matches!(digest, ContentDigest::Raw(_)));
        } else {
            assert_eq!(digest, ContentDigest::Exact(ExactHash::of(&content)));
        }
    }

    #[test]
    fn reader_matches_buffer() {
        let content = script_blob(20_000);
        let mut hasher = ContentHasher::new(MAX_RAW);
        hasher.update_from_reader(content.as_slice()).unwrap();

        let (digest, size) = hasher.finish();
        assert_eq!(size, 20_000);
        assert_eq!(digest, ContentDigest::compute(&content, MAX_RAW));
    }

    #[test]
    fn display_uses_tagged_hex_for_fuzzy_digests() {
        let digest = ContentDigest::compute(&script_blob(600), MAX_RAW);
        assert!(digest.to_string().starts_with("T1"));
        assert_eq!(digest.to_string().len(), 72);
    }
}
