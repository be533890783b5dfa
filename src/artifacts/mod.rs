//! Fingerprinting and diffing engine
//!
//! - `digest`: locality-sensitive fuzzy digest (builder, quantizer, distance, codec)
//! - `resources`: captured resources, snapshots and capture sessions
//! - `diff`: exact and approximate matching of resources across snapshots

pub mod diff;
pub mod digest;
pub mod resources;
