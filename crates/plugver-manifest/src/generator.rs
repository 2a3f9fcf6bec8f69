//! Full manifest regeneration
//!
//! Plugins come first (one line per definition file), followed by each asset
//! group in the configured order. Within a group files are sorted by name.

use crate::checksum::file_hash;
use crate::errors::ManifestError;
use crate::extractor::{PluginExtractor, DEFAULT_BASE_URL};
use crate::format::{asset_line, plugin_line};
use crate::scan::matching_files;
use crate::types::AssetRecord;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// A directory plus the file suffix selecting assets inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSource {
    pub dir: PathBuf,
    pub suffix: String,
}

impl AssetSource {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        AssetSource {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }
}

/// Inputs for one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSettings {
    pub plugins_dir: PathBuf,
    pub plugin_suffix: String,
    pub base_url: String,
    pub assets: Vec<AssetSource>,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        GenerateSettings {
            plugins_dir: PathBuf::from("../src"),
            plugin_suffix: "xml".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            assets: vec![
                AssetSource::new("../src", "lua"),
                AssetSource::new("../res", "png"),
                AssetSource::new("../res", "db"),
            ],
        }
    }
}

/// Counts reported after a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub plugins: usize,
    pub assets: usize,
}

/// Build the manifest and write it line by line to `out`
pub fn generate<W: Write>(
    settings: &GenerateSettings,
    out: &mut W,
) -> Result<GenerateSummary, ManifestError> {
    let extractor = PluginExtractor::new(&settings.base_url)?;
    let mut summary = GenerateSummary::default();

    for path in matching_files(&settings.plugins_dir, &settings.plugin_suffix)? {
        let record = extractor.extract_file(&path)?;
        let hash = file_hash(&path)?;
        writeln!(out, "{}", plugin_line(&record, &hash)).map_err(ManifestError::Output)?;
        summary.plugins += 1;
    }

    for source in &settings.assets {
        for path in matching_files(&source.dir, &source.suffix)? {
            let asset = AssetRecord {
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                hash: file_hash(&path)?,
            };
            writeln!(out, "{}", asset_line(&asset)).map_err(ManifestError::Output)?;
            summary.assets += 1;
        }
        debug!(
            "Processed asset group {}/*.{}",
            source.dir.display(),
            source.suffix
        );
    }

    info!(
        "Generated manifest: {} plugin(s), {} asset(s)",
        summary.plugins, summary.assets
    );
    Ok(summary)
}
