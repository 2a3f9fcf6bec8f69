//! Command handlers behind the two binaries

pub mod create;
pub mod update_hashes;
