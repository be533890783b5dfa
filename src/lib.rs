//! Change detection for the scripts and stylesheets a page loads
//!
//! Each resource is fingerprinted once per check: small content is kept
//! verbatim, larger content gets a locality-sensitive fuzzy digest, and content
//! unsuitable for fuzzy hashing falls back to SHA-1. Two snapshots are then
//! diffed by pairing resources on stable keys first and on digest similarity
//! second, so regenerated inline bundles are reported as modified instead of
//! as an unrelated removal and addition.

pub mod areas;
pub mod artifacts;
pub mod commands;

#[cfg(test)]
pub(crate) mod test_support;
