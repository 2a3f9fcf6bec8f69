//! plugins_versions.txt manifest tooling
//!
//! Core operations behind the `create-plugins-versions` and
//! `plugin-hash-updater` binaries:
//!
//! - [`checksum`]: streamed, uppercase-hex MD5 digests of files
//! - [`extractor`]: plugin id and update-URL extraction from plugin definitions
//! - [`format`]: byte-exact rendering of manifest lines
//! - [`generator`]: full manifest regeneration from the source tree
//! - [`index`] and [`refresher`]: hash refresh of an existing manifest
//!
//! Nothing here writes the manifest file; output goes to any `io::Write`.

pub mod checksum;
pub mod errors;
pub mod extractor;
pub mod format;
pub mod generator;
pub mod index;
pub mod refresher;
pub mod scan;
pub mod text;
pub mod types;

pub use errors::ManifestError;
pub use extractor::{PluginExtractor, DEFAULT_BASE_URL};
pub use generator::{generate, AssetSource, GenerateSettings, GenerateSummary};
pub use index::{HashIndex, IndexEntry};
pub use refresher::{classify, refresh, ManifestLine, RefreshSettings, RefreshSummary};
pub use types::{AssetRecord, AuxFile, PluginRecord};
