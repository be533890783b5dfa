//! Command-line facing components
//!
//! - `monitor`: configuration and output shared by every command
//! - `workspace`: capture directories on disk

pub mod monitor;
pub mod workspace;
