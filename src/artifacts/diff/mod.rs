//! Snapshot diffing
//!
//! - `diff_status`: change labels and the status filter used for display
//! - `resource_key`: identity used to pair resources across snapshots
//! - `matcher`: exact-key pairing followed by approximate fuzzy-digest matching

pub mod diff_status;
pub mod matcher;
pub mod resource_key;

pub use diff_status::{DiffFilter, DiffStatus};
pub use matcher::{DiffOptions, diff_resources, diff_snapshots};
