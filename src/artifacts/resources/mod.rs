//! Captured resources and snapshots
//!
//! - `content_digest`: per-resource fingerprint (raw, fuzzy or exact)
//! - `exact_hash`: SHA-1 content hash used as the fallback fingerprint
//! - `resource`: a captured script or stylesheet
//! - `snapshot`: all resources seen during one check
//! - `session`: capture lifecycle producing a snapshot

pub mod content_digest;
pub mod exact_hash;
pub mod resource;
pub mod session;
pub mod snapshot;

/// Length of a SHA-1 hash in hexadecimal format
pub const EXACT_HASH_LENGTH: usize = 40;
/// Content up to this size is kept verbatim unless configured otherwise
pub const DEFAULT_MAX_RAW_SIZE: u64 = 512;
