use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or refreshing the manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write manifest output: {0}")]
    Output(#[source] io::Error),

    #[error("Malformed index line {line}: expected '<id> <filename>', got {content:?}")]
    IndexLine { line: usize, content: String },

    #[error("Plugin id '{0}' is not listed in the id-to-name index")]
    UnknownPluginId(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ManifestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ManifestError::Io {
            path: path.into(),
            source,
        }
    }
}
