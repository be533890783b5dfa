//! Porcelain commands (user-facing change detection)
//!
//! ## Commands
//!
//! - `diff`: Compare two capture directories and report added, removed and
//!   modified resources

pub mod diff;
