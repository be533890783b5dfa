//! Deterministic content generators shared by unit tests

/// JavaScript-looking text truncated to `len` bytes
pub fn script_blob(len: usize) -> Vec<u8> {
    let mut text = String::with_capacity(len + 80);
    let mut i = 0;
    while text.len() < len {
        text.push_str(&format!(
            "function handler{i}(event) {{ return event.detail * {} + offset[{}]; }}\n",
            i * 7 + 3,
            i % 5
        ));
        i += 1;
    }
    text.truncate(len);
    text.into_bytes()
}

/// Pseudo-random bytes from a xorshift64 generator
pub fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// Overwrite `count` bytes in the middle of `data`
pub fn mutate_middle(data: &[u8], count: usize) -> Vec<u8> {
    let mut mutated = data.to_vec();
    let middle = mutated.len() / 2;
    for byte in &mut mutated[middle..middle + count] {
        *byte = if *byte == b'X' { b'Y' } else { b'X' };
    }
    mutated
}
