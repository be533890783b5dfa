//! Quantization of an accumulated histogram into a finalized digest
//!
//! The first [`EFFECTIVE_BUCKETS`] counters are ranked against their own
//! quartiles. Each counter contributes a 2-bit rank (0 to 3), four ranks are
//! packed per body byte, giving a [`CODE_SIZE`]-byte body. The quartiles also
//! feed a one-byte ratio code, and the ingested length is folded into a
//! log-scaled length code.

use crate::artifacts::digest::builder::DigestBuilder;
use crate::artifacts::digest::error::DigestError;
use crate::artifacts::digest::{CODE_SIZE, EFFECTIVE_BUCKETS, MIN_DATA_LENGTH};

const LOG_1_5: f64 = 0.405_465_1;
const LOG_1_3: f64 = 0.262_364_26;
const LOG_1_1: f64 = 0.095_310_18;

/// A finalized, immutable fuzzy digest
///
/// Produced by [`DigestBuilder::finalize`]. Compare two digests with
/// [`FuzzyDigest::distance`] and serialize them with the hex codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FuzzyDigest {
    pub(crate) checksum: u8,
    pub(crate) length_code: u8,
    pub(crate) ratio_code: u8,
    pub(crate) body: [u8; CODE_SIZE],
}

impl FuzzyDigest {
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Log-scaled bucket of the ingested length
    pub fn length_code(&self) -> u8 {
        self.length_code
    }

    /// Low nibble: q1/q3 ratio, high nibble: q2/q3 ratio
    pub fn ratio_code(&self) -> u8 {
        self.ratio_code
    }

    pub fn q1_ratio(&self) -> u8 {
        self.ratio_code & 0x0F
    }

    pub fn q2_ratio(&self) -> u8 {
        self.ratio_code >> 4
    }

    pub fn body(&self) -> &[u8; CODE_SIZE] {
        &self.body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quartiles {
    q1: u32,
    q2: u32,
    q3: u32,
}

impl Quartiles {
    /// Select the quartile markers from a working copy of the counters
    fn select(counts: &[u32; EFFECTIVE_BUCKETS]) -> Self {
        let mut scratch = *counts;
        let quarter = EFFECTIVE_BUCKETS / 4;

        let q2 = *scratch.select_nth_unstable(2 * quarter - 1).1;
        // after partitioning around q2 each half can be searched independently
        let (lower, upper) = scratch.split_at_mut(2 * quarter);
        let q1 = *lower.select_nth_unstable(quarter - 1).1;
        let q3 = *upper.select_nth_unstable(quarter - 1).1;

        Quartiles { q1, q2, q3 }
    }

    fn rank(&self, count: u32) -> u8 {
        if count > self.q3 {
            3
        } else if count > self.q2 {
            2
        } else if count > self.q1 {
            1
        } else {
            0
        }
    }

    /// Caller guarantees `q3 > 0`
    fn ratio_code(&self) -> u8 {
        let q3 = self.q3 as u64;
        let q1_ratio = (self.q1 as u64 * 100 / q3) % 16;
        let q2_ratio = (self.q2 as u64 * 100 / q3) % 16;
        ((q2_ratio << 4) | q1_ratio) as u8
    }
}

/// Log-scaled length bucket, wrapped to a byte
pub(crate) fn length_code(len: u64) -> u8 {
    let ln = (len as f64).ln();
    let code = if len <= 656 {
        (ln / LOG_1_5).floor()
    } else if len <= 3199 {
        (ln / LOG_1_3 - 8.727_77).floor()
    } else {
        (ln / LOG_1_1 - 62.547_2).floor()
    };

    ((code as i64) & 0xFF) as u8
}

impl DigestBuilder {
    /// Quantize the accumulated state into a [`FuzzyDigest`]
    ///
    /// The builder itself is left untouched, so its counters stay available
    /// for inspection after finalizing.
    pub fn finalize(&self) -> Result<FuzzyDigest, DigestError> {
        if self.len() < MIN_DATA_LENGTH {
            return Err(DigestError::InsufficientData { len: self.len() });
        }

        let mut counts = [0u32; EFFECTIVE_BUCKETS];
        counts.copy_from_slice(&self.buckets()[..EFFECTIVE_BUCKETS]);

        let nonzero = counts.iter().filter(|&&count| count > 0).count();
        if nonzero <= EFFECTIVE_BUCKETS / 2 {
            return Err(DigestError::InsufficientVariation { nonzero });
        }

        let quartiles = Quartiles::select(&counts);

        let mut body = [0u8; CODE_SIZE];
        for (code, group) in body.iter_mut().zip(counts.chunks_exact(4)) {
            *code = group
                .iter()
                .enumerate()
                .fold(0u8, |acc, (lane, &count)| {
                    acc | (quartiles.rank(count) << (2 * lane))
                });
        }

        Ok(FuzzyDigest {
            checksum: self.checksum(),
            length_code: length_code(self.len()),
            ratio_code: quartiles.ratio_code(),
            body,
        })
    }
}
