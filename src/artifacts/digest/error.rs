//! Error types for digest finalization and parsing.

/// Errors produced while finalizing or parsing a fuzzy digest.
///
/// The finalize errors are expected for small or uniform content and are
/// recovered by falling back to an exact hash. The parse errors report
/// malformed digest strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
    /// Fewer than [`MIN_DATA_LENGTH`](crate::artifacts::digest::MIN_DATA_LENGTH) bytes were ingested.
    #[error("insufficient data for a fuzzy digest: {len} bytes, need at least 50")]
    InsufficientData { len: u64 },

    /// Too few effective buckets were hit to quantize meaningfully.
    #[error("insufficient variation for a fuzzy digest: {nonzero} of 128 buckets populated")]
    InsufficientVariation { nonzero: usize },

    /// The digest string does not have the canonical length.
    #[error("invalid digest length: expected 70 hex characters, got {len}")]
    InvalidLength { len: usize },

    /// The digest string contains a character outside `[0-9a-fA-F]`.
    #[error("invalid hex character {found:?} at position {position}")]
    InvalidHex { position: usize, found: char },
}
