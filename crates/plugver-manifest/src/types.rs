//! Records that make up a plugins_versions.txt manifest

use smallvec::SmallVec;

/// Auxiliary file downloaded alongside a plugin on update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxFile {
    /// File name relative to the `src/` or `res/` directory of the repository
    pub name: String,
    /// Destination directory relative to the MUSHclient root, when the URL line carries one
    pub dest: Option<String>,
}

impl AuxFile {
    pub fn new(name: impl Into<String>) -> Self {
        AuxFile {
            name: name.into(),
            dest: None,
        }
    }

    pub fn with_dest(name: impl Into<String>, dest: impl Into<String>) -> Self {
        AuxFile {
            name: name.into(),
            dest: Some(dest.into()),
        }
    }
}

/// Metadata extracted from one plugin definition file
///
/// `aux_files` keeps the order in which the URL lines appear in the
/// definition; downstream tooling downloads them in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRecord {
    pub id: Option<String>,
    pub aux_files: SmallVec<[AuxFile; 4]>,
}

/// Standalone asset (script, image, database) listed by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub name: String,
    pub hash: String,
}
