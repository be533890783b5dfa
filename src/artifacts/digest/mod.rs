//! Locality-sensitive content digests
//!
//! A fuzzy digest summarizes a byte stream so that similar inputs produce similar
//! digests. The pipeline has four stages:
//!
//! - `builder`: streaming accumulation of a bucket histogram and a rolling checksum
//! - `quantizer`: turns the histogram into a 32-byte quartile-ranked body
//! - `distance`: dissimilarity score between two finalized digests
//! - `codec`: canonical 70-character hex representation
//!
//! ## Lifecycle
//!
//! A [`DigestBuilder`] accumulates content. Calling `finalize` either yields an
//! immutable [`FuzzyDigest`] or reports why the content is unsuitable
//! (too short, or not varied enough). Only finalized digests can be compared or
//! serialized.

pub mod builder;
pub mod codec;
pub mod distance;
pub mod error;
pub mod pearson;
pub mod quantizer;

pub use builder::DigestBuilder;
pub use distance::distance;
pub use error::DigestError;
pub use quantizer::FuzzyDigest;

/// Number of histogram buckets the builder increments
pub const BUCKET_COUNT: usize = 256;
/// Buckets that contribute to the quantized body (32 groups of 4)
pub const EFFECTIVE_BUCKETS: usize = 128;
/// Width of the quantized body in bytes
pub const CODE_SIZE: usize = 32;
/// Bytes kept in the rolling window
pub const WINDOW_SIZE: usize = 5;
/// Minimum number of ingested bytes for a usable digest
pub const MIN_DATA_LENGTH: u64 = 50;
/// Length of the hex body (checksum + length code + ratio code + body)
pub const DIGEST_HEX_LENGTH: usize = 2 * (3 + CODE_SIZE);
/// Format tag optionally prepended to the hex representation
pub const FORMAT_TAG: &str = "T1";
/// Distances strictly below this value count as an approximate match
pub const APPROXIMATE_MATCH_THRESHOLD: u32 = 200;
