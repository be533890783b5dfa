//! Plumbing commands (low-level fingerprint operations)
//!
//! ## Commands
//!
//! - `digest`: Fingerprint files the way a capture session would
//! - `compare`: Distance between two fuzzy digests or files

pub mod compare;
pub mod digest;
