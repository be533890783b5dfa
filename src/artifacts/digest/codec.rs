//! Canonical hex representation of a fuzzy digest
//!
//! ## Format
//!
//! 35 bytes rendered as 70 uppercase hex characters, optionally preceded by the
//! `T1` format tag:
//!
//! | bytes  | content                                   |
//! |--------|-------------------------------------------|
//! | 0      | checksum, nibbles swapped                 |
//! | 1      | length code, nibbles swapped              |
//! | 2      | ratio code, nibbles swapped               |
//! | 3..35  | body bytes, last to first                 |
//!
//! Parsing accepts either case and either form (tagged or bare).

use crate::artifacts::digest::error::DigestError;
use crate::artifacts::digest::quantizer::FuzzyDigest;
use crate::artifacts::digest::{CODE_SIZE, DIGEST_HEX_LENGTH, FORMAT_TAG};
use std::str::FromStr;

const HEADER_SIZE: usize = 3;

fn swap_nibbles(byte: u8) -> u8 {
    byte.rotate_left(4)
}

impl FuzzyDigest {
    fn to_wire_bytes(self) -> [u8; HEADER_SIZE + CODE_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE + CODE_SIZE];
        bytes[0] = swap_nibbles(self.checksum);
        bytes[1] = swap_nibbles(self.length_code);
        bytes[2] = swap_nibbles(self.ratio_code);

        for (slot, &code) in bytes[HEADER_SIZE..].iter_mut().zip(self.body.iter().rev()) {
            *slot = code;
        }

        bytes
    }

    fn from_wire_bytes(bytes: &[u8; HEADER_SIZE + CODE_SIZE]) -> Self {
        let mut body = [0u8; CODE_SIZE];
        for (slot, &code) in body.iter_mut().rev().zip(&bytes[HEADER_SIZE..]) {
            *slot = code;
        }

        FuzzyDigest {
            checksum: swap_nibbles(bytes[0]),
            length_code: swap_nibbles(bytes[1]),
            ratio_code: swap_nibbles(bytes[2]),
            body,
        }
    }

    /// Bare 70-character uppercase hex form
    pub fn to_hex(&self) -> String {
        self.to_wire_bytes()
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect()
    }

    /// Hex form preceded by the [`FORMAT_TAG`]
    pub fn to_tagged_hex(&self) -> String {
        format!("{FORMAT_TAG}{}", self.to_hex())
    }

    /// Parse a digest from its hex form, with or without the format tag
    ///
    /// # Errors
    ///
    /// - [`DigestError::InvalidLength`] if the untagged string is not exactly
    ///   70 characters long
    /// - [`DigestError::InvalidHex`] if any character is not a hex digit
    pub fn try_parse(input: &str) -> Result<Self, DigestError> {
        let (offset, hex) = match input.get(..FORMAT_TAG.len()) {
            Some(tag) if tag.eq_ignore_ascii_case(FORMAT_TAG) => {
                (FORMAT_TAG.len(), &input[FORMAT_TAG.len()..])
            }
            _ => (0, input),
        };

        let len = hex.chars().count();
        if len != DIGEST_HEX_LENGTH {
            return Err(DigestError::InvalidLength { len });
        }

        if let Some((position, found)) = hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(DigestError::InvalidHex {
                position: offset + position,
                found,
            });
        }

        let mut bytes = [0u8; HEADER_SIZE + CODE_SIZE];
        for (slot, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
            *slot = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }

        Ok(Self::from_wire_bytes(&bytes))
    }
}

/// Caller has already checked `digit` is an ASCII hex digit
fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

impl std::fmt::Display for FuzzyDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for FuzzyDigest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl serde::Serialize for FuzzyDigest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_tagged_hex())
    }
}

impl<'de> serde::Deserialize<'de> for FuzzyDigest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::try_parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::digest::DigestBuilder;
    use crate::test_support::script_blob;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    const SCRIPT_600_HEX: &str =
        "0EF0F75EB44A7299225E777C12CE009571392BC0745881AC92A98EF89E3C1569D33FB5";

    #[fixture]
    fn digest() -> FuzzyDigest {
        DigestBuilder::from_bytes(&script_blob(600))
            .finalize()
            .unwrap()
    }

    #[rstest]
    fn emits_canonical_uppercase_hex(digest: FuzzyDigest) {
        assert_eq!(digest.to_hex(), SCRIPT_600_HEX);
        assert_eq!(digest.to_string(), SCRIPT_600_HEX);
        assert_eq!(digest.to_tagged_hex(), format!("T1{SCRIPT_600_HEX}"));
    }

    #[rstest]
    fn header_bytes_are_nibble_swapped(digest: FuzzyDigest) {
        // checksum 0xE0 and length code 0x0F, see quantizer tests
        assert!(digest.to_hex().starts_with("0EF0"));
    }

    #[rstest]
    #[case::bare(SCRIPT_600_HEX.to_string())]
    #[case::tagged(format!("T1{SCRIPT_600_HEX}"))]
    #[case::lowercase(SCRIPT_600_HEX.to_lowercase())]
    #[case::lowercase_tag(format!("t1{}", SCRIPT_600_HEX.to_lowercase()))]
    fn parses_accepted_forms(digest: FuzzyDigest, #[case] input: String) {
        assert_eq!(FuzzyDigest::try_parse(&input), Ok(digest));
    }

    #[rstest]
    #[case::empty("", 0)]
    #[case::short(&SCRIPT_600_HEX[..68], 68)]
    #[case::tag_only("T1", 0)]
    fn rejects_wrong_length(#[case] input: &str, #[case] len: usize) {
        assert_eq!(
            FuzzyDigest::try_parse(input),
            Err(DigestError::InvalidLength { len })
        );
    }

    #[test]
    fn rejects_overlong_input_instead_of_truncating() {
        let input = format!("{SCRIPT_600_HEX}00");
        assert_eq!(
            FuzzyDigest::try_parse(&input),
            Err(DigestError::InvalidLength { len: 72 })
        );
    }

    #[test]
    fn rejects_non_hex_characters() {
        let mut input = SCRIPT_600_HEX.to_string();
        input.replace_range(10..11, "G");

        assert_eq!(
            FuzzyDigest::try_parse(&input),
            Err(DigestError::InvalidHex {
                position: 10,
                found: 'G',
            })
        );
    }

    #[test]
    fn invalid_hex_position_accounts_for_tag() {
        let input = format!("T1{}", SCRIPT_600_HEX.replacen('0', "x", 1));

        assert_eq!(
            FuzzyDigest::try_parse(&input),
            Err(DigestError::InvalidHex {
                position: 2,
                found: 'x',
            })
        );
    }

    #[rstest]
    fn serde_uses_tagged_hex(digest: FuzzyDigest) {
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"T1{SCRIPT_600_HEX}\""));

        let parsed: FuzzyDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, digest);
    }

    proptest! {
        #[test]
        fn prop_hex_round_trip(
            checksum in any::<u8>(),
            length_code in any::<u8>(),
            ratio_code in any::<u8>(),
            body in proptest::array::uniform32(any::<u8>()),
        ) {
            let digest = FuzzyDigest { checksum, length_code, ratio_code, body };
            prop_assert_eq!(FuzzyDigest::try_parse(&digest.to_hex()), Ok(digest));
            prop_assert_eq!(FuzzyDigest::try_parse(&digest.to_tagged_hex()), Ok(digest));
        }
    }
}
