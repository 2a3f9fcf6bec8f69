use crate::common::GlobalOpts;
use anyhow::{Context, Result};
use clap::Args;
use plugver_logger as logger;
use plugver_manifest::generate;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Options for regenerating the manifest
#[derive(Args, Debug, Clone, Default)]
pub struct CreateCommand {
    /// Directory holding the plugin definitions (default: ../src)
    #[arg(long, value_name = "DIR")]
    pub plugins_dir: Option<PathBuf>,

    /// Raw download root the plugins' update URLs start with
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Print a freshly built manifest to stdout
pub fn handle_create(cmd: CreateCommand, opts: &GlobalOpts) -> Result<()> {
    let config = opts.load_config()?;
    let mut settings = config.generate_settings();
    if let Some(dir) = cmd.plugins_dir {
        settings.plugins_dir = dir;
    }
    if let Some(url) = cmd.base_url {
        settings.base_url = url;
    }

    logger::step(&format!(
        "Scanning {}/*.{} for plugins",
        settings.plugins_dir.display(),
        settings.plugin_suffix
    ));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    generate(&settings, &mut out).context("Failed to generate manifest")?;
    out.flush().context("Failed to write manifest to stdout")?;
    Ok(())
}
