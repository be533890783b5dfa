use crate::areas::monitor::Monitor;
use crate::artifacts::digest::{DigestBuilder, FuzzyDigest};
use anyhow::Context;
use std::path::Path;

impl Monitor {
    /// Print the distance between two operands
    ///
    /// Each operand is either a digest string (bare or tagged) or the path of a
    /// file to fingerprint.
    pub fn compare(&self, a: &str, b: &str) -> anyhow::Result<()> {
        let a = Self::resolve_operand(a)?;
        let b = Self::resolve_operand(b)?;

        let distance = a.distance(&b, self.diff_options().include_length);
        writeln!(self.writer(), "{distance}")?;

        Ok(())
    }

    fn resolve_operand(operand: &str) -> anyhow::Result<FuzzyDigest> {
        let path = Path::new(operand);
        if path.is_file() {
            let content = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return DigestBuilder::from_bytes(&content)
                .finalize()
                .with_context(|| format!("Cannot build a fuzzy digest of {}", path.display()));
        }

        FuzzyDigest::try_parse(operand)
            .with_context(|| format!("{operand} is neither a file nor a valid digest"))
    }
}
