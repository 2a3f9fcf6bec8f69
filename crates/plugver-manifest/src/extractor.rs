//! Plugin metadata extraction from MUSHclient plugin definitions
//!
//! A definition is an XML file with embedded Lua. The extractor only looks
//! for two things:
//!
//! - the `id="..."` attribute of the `<plugin>` element
//! - the URL table returned by `plugin_update_aux_url()`, e.g.
//!
//! ```text
//! function plugin_update_aux_url()
//!   local t = {
//!     "https://raw.githubusercontent.com/<org>/mm-mushclient-scripts/master/src/mm_mapper.lua,MUSH/lua",
//!   }
//!   return (table.concat(t, ";"))
//! end
//! ```
//!
//! Each line is classified independently; anything unrecognised is skipped.

use crate::errors::ManifestError;
use crate::text::{decode_latin1, normalize_newlines};
use crate::types::{AuxFile, PluginRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Raw download root the plugins' update URLs point at
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/MateriaMagicaLLC/mm-mushclient-scripts/master/";

/// Line that opens the update-URL function
pub const UPDATE_BLOCK_SENTINEL: &str = "function plugin_update_aux_url()";

static ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[ ]+id="([0-9a-f]+)"$"#).unwrap_or_else(|e| unreachable!("{e}"))
});

/// Compiled line patterns for a given download base URL
#[derive(Debug, Clone)]
pub struct PluginExtractor {
    url_dest: Regex,
    url: Regex,
}

impl PluginExtractor {
    pub fn new(base_url: &str) -> Result<Self, ManifestError> {
        let base = regex::escape(base_url);
        Ok(PluginExtractor {
            url_dest: Regex::new(&format!(r#"^[ ]+"{base}(src|res)/(.+),(.+)",$"#))?,
            url: Regex::new(&format!(r#"^[ ]+"{base}(src|res)/(.+)",$"#))?,
        })
    }

    /// Read a definition file (ISO-8859-1) and extract its record
    pub fn extract_file(&self, path: &Path) -> Result<PluginRecord, ManifestError> {
        let bytes = fs::read(path).map_err(|e| ManifestError::io(path, e))?;
        let record = self.extract_str(&decode_latin1(&bytes));
        debug!(
            "Extracted {}: id={:?}, {} aux file(s)",
            path.display(),
            record.id,
            record.aux_files.len()
        );
        Ok(record)
    }

    /// Extract a record from already-decoded definition text
    pub fn extract_str(&self, text: &str) -> PluginRecord {
        let mut record = PluginRecord::default();
        let mut in_update_block = false;

        for line in normalize_newlines(text).lines() {
            if let Some(caps) = ID_RE.captures(line) {
                if record.id.is_none() {
                    record.id = Some(caps[1].to_string());
                } else {
                    trace!("Ignoring repeated id line: {}", line);
                }
                continue;
            }

            if line == UPDATE_BLOCK_SENTINEL {
                in_update_block = true;
                continue;
            }

            if !in_update_block {
                continue;
            }

            if let Some(caps) = self.url_dest.captures(line) {
                record
                    .aux_files
                    .push(AuxFile::with_dest(&caps[2], &caps[3]));
                continue;
            }

            if let Some(caps) = self.url.captures(line) {
                record.aux_files.push(AuxFile::new(&caps[2]));
                continue;
            }

            if line == "end" {
                in_update_block = false;
            }
        }

        record
    }
}

impl Default for PluginExtractor {
    fn default() -> Self {
        // The default base URL is a fixed literal; escaping keeps it valid.
        match Self::new(DEFAULT_BASE_URL) {
            Ok(extractor) => extractor,
            Err(e) => unreachable!("default URL patterns must compile: {e}"),
        }
    }
}
