use clap::Parser;
use plugver::commands::update_hashes::{handle_update_hashes, UpdateHashesCommand};
use plugver::{init_logging, GlobalOpts};
use plugver_logger as logger;

/// Regenerates the plugin hashes of an existing plugins_versions.txt
///
/// Usage:
///   plugin-hash-updater > out
///   mv out plugins_versions.txt
#[derive(Parser)]
#[command(name = "plugin-hash-updater")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Refresh plugin hashes in plugins_versions.txt",
    long_about = "Recomputes the hash of every plugin listed in plugins_id_to_name.txt and \
                  prints plugins_versions.txt with those hashes replaced. New plugins must be \
                  added to plugins_versions.txt by hand first. Do not redirect the output \
                  straight onto plugins_versions.txt: the shell truncates it before it is read."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(flatten)]
    command: UpdateHashesCommand,
}

fn main() {
    let cli = Cli::parse();
    init_logging("plugin-hash-updater", &cli.global);

    if let Err(e) = handle_update_hashes(cli.command, &cli.global) {
        logger::error(&format!("{:#}", e));
        if cli.global.verbosity_level() > 0 {
            logger::show_log_path();
        }
        std::process::exit(1);
    }
}
