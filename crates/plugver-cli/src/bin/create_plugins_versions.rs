use clap::Parser;
use plugver::commands::create::{handle_create, CreateCommand};
use plugver::{init_logging, GlobalOpts};
use plugver_logger as logger;

/// Recreates plugins_versions.txt
///
/// Usage: create-plugins-versions > plugins_versions.txt
#[derive(Parser)]
#[command(name = "create-plugins-versions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Regenerate plugins_versions.txt on stdout",
    long_about = "Scans ../src/*.xml plugin definitions and the ../src and ../res assets, \
                  then prints a fresh plugins_versions.txt to stdout."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(flatten)]
    command: CreateCommand,
}

fn main() {
    let cli = Cli::parse();
    init_logging("create-plugins-versions", &cli.global);

    if let Err(e) = handle_create(cli.command, &cli.global) {
        logger::error(&format!("{:#}", e));
        if cli.global.verbosity_level() > 0 {
            logger::show_log_path();
        }
        std::process::exit(1);
    }
}
