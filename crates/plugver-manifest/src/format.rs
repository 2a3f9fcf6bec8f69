//! Manifest line rendering
//!
//! The manifest is read by Lua code inside the plugins with its own string
//! patterns, so spacing here is part of the format and must not change.

use crate::types::{AssetRecord, AuxFile, PluginRecord};
use std::fmt::Write;

/// Marker written when a definition declares no plugin id
pub const MISSING_ID: &str = "nil";

/// Render `id = <id>  hash = <hash>` plus the optional `aux_files` table
pub fn plugin_line(record: &PluginRecord, hash: &str) -> String {
    let id = record.id.as_deref().unwrap_or(MISSING_ID);
    let mut line = format!("id = {}  hash = {}", id, hash);
    if !record.aux_files.is_empty() {
        line.push_str("  aux_files = {");
        for (i, aux) in record.aux_files.iter().enumerate() {
            push_aux_entry(&mut line, i + 1, aux);
        }
        line.push_str("   }");
    }
    line
}

fn push_aux_entry(line: &mut String, index: usize, aux: &AuxFile) {
    let _ = write!(line, "   [{}] = {{     name = \"{}\",", index, aux.name);
    if let Some(dest) = aux.dest.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(line, "     dest = \"{}\",", dest);
    }
    line.push_str("     },");
}

/// Render `name = <name>  hash = <hash>`
pub fn name_line(name: &str, hash: &str) -> String {
    format!("name = {}  hash = {}", name, hash)
}

pub fn asset_line(asset: &AssetRecord) -> String {
    name_line(&asset.name, &asset.hash)
}
