use crate::common::GlobalOpts;
use anyhow::{Context, Result};
use clap::Args;
use plugver_logger as logger;
use plugver_manifest::{refresh, HashIndex};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Options for refreshing plugin hashes in an existing manifest
#[derive(Args, Debug, Clone, Default)]
pub struct UpdateHashesCommand {
    /// Directory the index's file names are relative to (default: ../src)
    #[arg(long, value_name = "DIR")]
    pub plugins_dir: Option<PathBuf>,

    /// Plugin id to file name index (default: plugins_id_to_name.txt)
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Manifest to refresh (default: plugins_versions.txt)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

/// Print the manifest with every plugin hash recomputed
///
/// Redirect into a new file and move it over the manifest afterwards;
/// redirecting straight onto the manifest truncates it before it is read.
pub fn handle_update_hashes(cmd: UpdateHashesCommand, opts: &GlobalOpts) -> Result<()> {
    let config = opts.load_config()?;
    let mut settings = config.refresh_settings();
    if let Some(dir) = cmd.plugins_dir {
        settings.plugins_dir = dir;
    }
    if let Some(index) = cmd.index {
        settings.index = index;
    }
    if let Some(manifest) = cmd.manifest {
        settings.manifest = manifest;
    }

    logger::spinner_start(&format!("Hashing plugins listed in {}", settings.index.display()));
    let index = match HashIndex::load(&settings.index, &settings.plugins_dir) {
        Ok(index) => index,
        Err(e) => {
            logger::spinner_error("Failed to build the plugin hash index");
            return Err(e).context("Failed to build the plugin hash index");
        }
    };
    logger::spinner_stop();
    logger::debug(&format!("Hashed {} plugin(s)", index.len()));

    let manifest = fs::read_to_string(&settings.manifest)
        .with_context(|| format!("Failed to read {}", settings.manifest.display()))?;
    if manifest.is_empty() {
        logger::warn(&format!(
            "{} is empty; nothing to refresh",
            settings.manifest.display()
        ));
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = refresh(&manifest, &index, &mut out).context("Failed to refresh manifest")?;
    out.flush().context("Failed to write manifest to stdout")?;

    if summary.dropped > 0 {
        logger::debug(&format!(
            "{} line(s) matched neither the plugin nor the name shape and were left out",
            summary.dropped
        ));
    }
    Ok(())
}
