use crate::areas::monitor::Monitor;
use crate::artifacts::resources::content_digest::{ContentDigest, ContentHasher};
use anyhow::Context;
use std::path::Path;

impl Monitor {
    /// Print the fingerprint of each file: `<kind> <value> <path>`
    ///
    /// Raw fingerprints print the content size instead of a hash.
    pub fn digest(&self, files: &[impl AsRef<Path>], tagged: bool) -> anyhow::Result<()> {
        for file in files {
            let file = file.as_ref();
            let reader = std::fs::File::open(file)
                .with_context(|| format!("Failed to open {}", file.display()))?;

            let mut hasher = ContentHasher::new(self.capture_options().max_raw_size);
            hasher
                .update_from_reader(std::io::BufReader::new(reader))
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let (digest, size) = hasher.finish();

            let value = match &digest {
                ContentDigest::Raw(_) => size.to_string(),
                ContentDigest::Fuzzy(fuzzy) if tagged => fuzzy.to_tagged_hex(),
                ContentDigest::Fuzzy(fuzzy) => fuzzy.to_hex(),
                ContentDigest::Exact(hash) => hash.to_string(),
            };

            writeln!(
                self.writer(),
                "{} {} {}",
                digest.label(),
                value,
                file.display()
            )?;
        }

        Ok(())
    }
}
