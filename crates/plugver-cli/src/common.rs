//! Common types and utilities shared by both binaries

use anyhow::{Context, Result};
use clap::Parser;
use plugver_config::Config;
use plugver_logger as logger;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Global CLI options available to both tools
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Only report errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Config file (default: $PLUGVER_CONFIG, then ./plugver.toml)"
    )]
    pub config: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Load the configuration these options point at
    pub fn load_config(&self) -> Result<Config> {
        if let Some(path) = Config::path(self.config.as_deref()) {
            logger::debug(&format!("Reading config from: {}", path.display()));
        }
        Config::load(self.config.as_deref()).context("Failed to load configuration")
    }
}

/// Set up the file/console logger and the `tracing` subscriber for `tool`
pub fn init_logging(tool: &str, opts: &GlobalOpts) {
    if let Err(e) = logger::init_with_verbosity(tool, opts.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let level = logger::verbosity_to_filter();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "plugver={level},plugver_manifest={level},plugver_config={level}"
        ))
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
    {
        logger::warn(&format!("Failed to initialize tracing: {}", e));
    }
}
