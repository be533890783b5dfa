//! Dissimilarity score between finalized digests
//!
//! The score adds up four components:
//!
//! - length code: cyclic distance over 256, scaled (optional)
//! - q1/q3 and q2/q3 ratio nibbles: cyclic distance over 16, scaled
//! - checksum: one point when the checksums differ
//! - body: per-byte lookup in a 256x256 table of quad-rank distances
//!
//! Small cyclic distances (0 or 1) count as-is; anything larger is multiplied
//! by [`STEP_PENALTY`]. Lower scores mean more similar content.

use crate::artifacts::digest::quantizer::FuzzyDigest;
use std::sync::LazyLock;

const STEP_PENALTY: u32 = 12;
const LENGTH_RANGE: u32 = 256;
const RATIO_RANGE: u32 = 16;

/// Pairwise distance between two packed bytes of four 2-bit ranks
static QUAD_RANK_DISTANCE: LazyLock<Box<[[u8; 256]; 256]>> = LazyLock::new(|| {
    let mut table = Box::new([[0u8; 256]; 256]);
    for (x, row) in table.iter_mut().enumerate() {
        for (y, cell) in row.iter_mut().enumerate() {
            *cell = (0..4)
                .map(|lane| {
                    let rx = (x >> (2 * lane)) & 0b11;
                    let ry = (y >> (2 * lane)) & 0b11;
                    match rx.abs_diff(ry) {
                        // opposite extremes weigh double
                        3 => 6,
                        d => d as u8,
                    }
                })
                .sum();
        }
    }
    table
});

/// Shortest distance between `x` and `y` on a ring of size `range`
fn cyclic_distance(x: u32, y: u32, range: u32) -> u32 {
    let direct = x.abs_diff(y);
    direct.min(range - direct)
}

fn step_score(d: u32) -> u32 {
    if d <= 1 { d } else { d * STEP_PENALTY }
}

/// Distance between two digests, including the length component
pub fn distance(a: &FuzzyDigest, b: &FuzzyDigest) -> u32 {
    a.distance(b, true)
}

impl FuzzyDigest {
    /// Score how different `other` is from `self`
    ///
    /// Pass `include_length = false` to ignore the length code when comparing
    /// content whose size is expected to vary widely.
    pub fn distance(&self, other: &FuzzyDigest, include_length: bool) -> u32 {
        let mut total = 0;

        if include_length {
            total += step_score(cyclic_distance(
                self.length_code as u32,
                other.length_code as u32,
                LENGTH_RANGE,
            ));
        }

        total += step_score(cyclic_distance(
            self.q1_ratio() as u32,
            other.q1_ratio() as u32,
            RATIO_RANGE,
        ));
        total += step_score(cyclic_distance(
            self.q2_ratio() as u32,
            other.q2_ratio() as u32,
            RATIO_RANGE,
        ));

        if self.checksum != other.checksum {
            total += 1;
        }

        total + body_distance(&self.body, &other.body)
    }
}

fn body_distance(a: &[u8], b: &[u8]) -> u32 {
    let table = &*QUAD_RANK_DISTANCE;
    a.iter()
        .zip(b)
        .map(|(&x, &y)| table[x as usize][y as usize] as u32)
        .sum()
}
