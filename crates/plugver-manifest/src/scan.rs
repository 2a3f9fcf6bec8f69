//! Directory scanning for definition and asset files

use crate::errors::ManifestError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// List files directly inside `dir` named `*.<suffix>`, sorted by file name
///
/// The suffix match is case-sensitive and hidden files are skipped, like a
/// shell glob. Symlinks are followed. A missing directory matches nothing.
pub fn matching_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, ManifestError> {
    let wanted = format!(".{}", suffix);
    let mut files = Vec::new();

    if !dir.is_dir() {
        debug!("{} is not a directory; no '*{}' files", dir.display(), wanted);
        return Ok(files);
    }

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
            });
            ManifestError::io(path, source)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        // Lossy decoding keeps the ASCII dot and suffix intact
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || !name.ends_with(&wanted) {
            continue;
        }
        files.push(entry.into_path());
    }

    debug!(
        "Found {} '*{}' file(s) in {}",
        files.len(),
        wanted,
        dir.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_sorted_non_recursive_suffix_match() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let dir = temp_dir.path();
        for name in ["zeta.xml", "alpha.xml", "notes.txt", ".hidden.xml", "UPPER.XML"] {
            assert!(fs::write(dir.join(name), "x").is_ok());
        }
        assert!(fs::create_dir_all(dir.join("nested.xml")).is_ok());
        assert!(fs::write(dir.join("nested.xml").join("inner.xml"), "x").is_ok());

        let found = matching_files(dir, "xml");
        assert!(found.is_ok());
        assert_eq!(names(&found.unwrap_or_default()), ["alpha.xml", "zeta.xml"]);
    }

    #[test]
    fn test_missing_directory_matches_nothing() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let result = matching_files(&temp_dir.path().join("nope"), "lua");
        assert!(matches!(result, Ok(ref files) if files.is_empty()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_listed() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let src = temp_dir.path().join("src");
        let elsewhere = temp_dir.path().join("elsewhere");
        assert!(fs::create_dir_all(&src).is_ok());
        assert!(fs::create_dir_all(&elsewhere).is_ok());
        assert!(fs::write(elsewhere.join("real.xml"), "x").is_ok());
        assert!(std::os::unix::fs::symlink(elsewhere.join("real.xml"), src.join("linked.xml")).is_ok());
        assert!(std::os::unix::fs::symlink(&elsewhere, src.join("dir.xml")).is_ok());

        let found = matching_files(&src, "xml");
        assert!(found.is_ok());
        assert_eq!(names(&found.unwrap_or_default()), ["linked.xml"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_listed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let name = OsStr::from_bytes(b"caf\xe9.lua");
        if fs::write(temp_dir.path().join(name), "x").is_err() {
            // Some filesystems refuse non-UTF-8 names
            return;
        }

        let found = matching_files(temp_dir.path(), "lua").unwrap_or_default();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name(), Some(name));
    }
}
