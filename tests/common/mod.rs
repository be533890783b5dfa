#![allow(dead_code)]

pub mod command;
pub mod file;

/// Fuzzy digest of `file::script_blob(600)`
pub const SCRIPT_600_HEX: &str =
    "0EF0F75EB44A7299225E777C12CE009571392BC0745881AC92A98EF89E3C1569D33FB5";

/// Fuzzy digest of `file::mutate_middle(&file::script_blob(600), 5)`
pub const MUTATED_SCRIPT_600_HEX: &str =
    "B8F0475EB44A7299220E777C12CE009571392BC0745881AC82998EF89E3C1669D33FA5";

/// Distance between the two digests above
pub const SMALL_EDIT_DISTANCE: u32 = 67;
