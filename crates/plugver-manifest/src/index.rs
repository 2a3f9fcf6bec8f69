//! Plugin id to definition file index (`plugins_id_to_name.txt`)
//!
//! Each line is `<id> <filename>`. Hashes are computed as soon as the index
//! is loaded so a missing definition fails the run before any output.

use crate::checksum::file_hash;
use crate::errors::ManifestError;
use crate::text::normalize_newlines;
use ahash::AHashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub filename: String,
    pub hash: String,
}

/// Fresh hashes keyed by plugin id
#[derive(Debug, Clone, Default)]
pub struct HashIndex {
    entries: AHashMap<String, IndexEntry>,
}

impl HashIndex {
    /// Parse the index file and hash every listed definition under `plugins_dir`
    pub fn load(index_path: &Path, plugins_dir: &Path) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(index_path).map_err(|e| ManifestError::io(index_path, e))?;
        let mut index = HashIndex::default();

        for (id, filename) in parse_index(&content)? {
            let path = plugins_dir.join(&filename);
            let hash = file_hash(&path)?;
            index.insert(id, IndexEntry { filename, hash });
        }

        debug!(
            "Loaded {} plugin(s) from {}",
            index.len(),
            index_path.display()
        );
        Ok(index)
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: IndexEntry) {
        self.entries.insert(id.into(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// Fresh hash for `id`, or an error if the index does not list it
    pub fn hash_for(&self, id: &str) -> Result<&str, ManifestError> {
        self.get(id)
            .map(|entry| entry.hash.as_str())
            .ok_or_else(|| ManifestError::UnknownPluginId(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split index text into `(id, filename)` pairs, in file order
///
/// Every line, blank ones included, must hold exactly two whitespace
/// separated tokens.
pub fn parse_index(content: &str) -> Result<Vec<(String, String)>, ManifestError> {
    normalize_newlines(content)
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(id), Some(filename), None) => Ok((id.to_string(), filename.to_string())),
                _ => Err(ManifestError::IndexLine {
                    line: i + 1,
                    content: line.to_string(),
                }),
            }
        })
        .collect()
}
