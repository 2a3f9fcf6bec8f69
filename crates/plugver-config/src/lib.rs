//! Configuration for the plugins_versions.txt tools
//!
//! Both tools work without any configuration: every value defaults to the
//! repository layout the tools are run from (the `tools/` directory, with
//! plugins in `../src` and images/databases in `../res`). A `plugver.toml`
//! can override any of it:
//!
//! ```toml
//! base-url = "https://raw.githubusercontent.com/MateriaMagicaLLC/mm-mushclient-scripts/master/"
//!
//! [generate]
//! plugins-dir = "../src"
//! plugin-suffix = "xml"
//! assets = [{ dir = "../res", suffix = "png" }]
//!
//! [refresh]
//! index = "plugins_id_to_name.txt"
//! manifest = "plugins_versions.txt"
//! ```

use plugver_manifest::{AssetSource, GenerateSettings, RefreshSettings};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "PLUGVER_CONFIG";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "plugver.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub generate: GenerateSection,
    #[serde(default)]
    pub refresh: RefreshSection,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenerateSection {
    #[serde(default)]
    pub plugins_dir: Option<PathBuf>,
    #[serde(default)]
    pub plugin_suffix: Option<String>,
    /// Replaces the default asset groups entirely when set
    #[serde(default)]
    pub assets: Option<Vec<AssetEntry>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AssetEntry {
    pub dir: PathBuf,
    pub suffix: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RefreshSection {
    #[serde(default)]
    pub plugins_dir: Option<PathBuf>,
    #[serde(default)]
    pub index: Option<PathBuf>,
    #[serde(default)]
    pub manifest: Option<PathBuf>,
}

impl Config {
    /// Locate the config file to use, if any
    ///
    /// Order: explicit path, `PLUGVER_CONFIG`, `./plugver.toml`.
    pub fn path(explicit: Option<&Path>) -> Option<PathBuf> {
        resolve_path(
            explicit,
            std::env::var(CONFIG_ENV).ok(),
            Path::new(DEFAULT_CONFIG_FILE),
        )
    }

    /// Load the config, falling back to defaults when no file is found
    ///
    /// A path given explicitly (flag or environment) must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::path(explicit) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Generator inputs with config values applied over the defaults
    pub fn generate_settings(&self) -> GenerateSettings {
        let mut settings = GenerateSettings::default();
        if let Some(ref url) = self.base_url {
            settings.base_url = url.clone();
        }
        if let Some(ref dir) = self.generate.plugins_dir {
            settings.plugins_dir = dir.clone();
        }
        if let Some(ref suffix) = self.generate.plugin_suffix {
            settings.plugin_suffix = suffix.clone();
        }
        if let Some(ref assets) = self.generate.assets {
            settings.assets = assets
                .iter()
                .map(|a| AssetSource::new(a.dir.clone(), a.suffix.clone()))
                .collect();
        }
        settings
    }

    /// Refresher inputs with config values applied over the defaults
    pub fn refresh_settings(&self) -> RefreshSettings {
        let mut settings = RefreshSettings::default();
        if let Some(ref dir) = self.refresh.plugins_dir {
            settings.plugins_dir = dir.clone();
        }
        if let Some(ref index) = self.refresh.index {
            settings.index = index.clone();
        }
        if let Some(ref manifest) = self.refresh.manifest {
            settings.manifest = manifest.clone();
        }
        settings
    }
}

fn resolve_path(
    explicit: Option<&Path>,
    env_value: Option<String>,
    local_default: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(env_path) = env_value {
        let trimmed = env_path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    local_default
        .is_file()
        .then(|| local_default.to_path_buf())
}
