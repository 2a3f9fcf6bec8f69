//! plugver: maintenance tools for the plugins_versions.txt manifest
//!
//! The library exposes the command handlers so both binaries and the
//! integration tests share them.

pub mod commands;
pub mod common;

pub use common::{init_logging, GlobalOpts};
