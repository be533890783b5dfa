//! Command implementations
//!
//! Commands are implemented as methods on [`Monitor`](crate::areas::monitor::Monitor)
//! and write their output to its writer.
//!
//! - `plumbing`: single-resource fingerprinting and digest comparison
//! - `porcelain`: snapshot diffing between two capture directories

pub mod plumbing;
pub mod porcelain;
