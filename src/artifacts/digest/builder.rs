use crate::artifacts::digest::pearson::pearson;
use crate::artifacts::digest::{BUCKET_COUNT, WINDOW_SIZE};

/// Bucket salts paired with the window offsets they combine with the newest byte
const BUCKET_CONTRIBUTIONS: [(u8, usize, usize); 6] = [
    (2, 1, 2),
    (3, 1, 3),
    (5, 2, 3),
    (7, 2, 4),
    (11, 1, 4),
    (13, 3, 4),
];

/// Streaming accumulator for a fuzzy digest
///
/// Content can be fed in any number of chunks; the result only depends on the
/// concatenated bytes. Only the last [`WINDOW_SIZE`] bytes are retained, so
/// arbitrarily large resources can be fingerprinted without buffering them.
///
/// A builder belongs to exactly one resource. Create a new one per resource.
#[derive(Debug, Clone)]
pub struct DigestBuilder {
    buckets: [u32; BUCKET_COUNT],
    window: [u8; WINDOW_SIZE],
    checksum: u8,
    len: u64,
}

impl Default for DigestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestBuilder {
    pub fn new() -> Self {
        DigestBuilder {
            buckets: [0; BUCKET_COUNT],
            window: [0; WINDOW_SIZE],
            checksum: 0,
            len: 0,
        }
    }

    /// Convenience constructor that ingests a whole buffer
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut builder = Self::new();
        builder.update(data);
        builder
    }

    /// Ingest the next chunk of content
    pub fn update(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            let head = (self.len % WINDOW_SIZE as u64) as usize;
            self.window[head] = byte;

            if self.len >= (WINDOW_SIZE - 1) as u64 {
                self.ingest_window(head);
            }

            self.len += 1;
        }
    }

    fn ingest_window(&mut self, head: usize) {
        let window = self.window;
        // back(n) is the byte n positions before the newest one
        let back = |n: usize| window[(head + WINDOW_SIZE - n) % WINDOW_SIZE];
        let newest = back(0);

        self.checksum = pearson(0, newest, back(1), self.checksum);

        for (salt, a, b) in BUCKET_CONTRIBUTIONS {
            let bucket = pearson(salt, newest, back(a), back(b));
            let count = &mut self.buckets[bucket as usize];
            *count = count.saturating_add(1);
        }
    }

    /// Number of bytes ingested so far
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw bucket counters, for diagnostics
    pub fn buckets(&self) -> &[u32; BUCKET_COUNT] {
        &self.buckets
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }
}
