//! mister-arcade CLI
//!
//! Builds a lookup database of MiSTer arcade games from a MAME metadata
//! export and the `.mra` files on the SD card, and queries it.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Install the logger.
///
/// Normal output is plain messages at info level; `--verbose` adds debug
/// messages with timestamps and `--quiet` keeps only warnings and errors.
/// `RUST_LOG` still applies on top.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Error | log::Level::Warn => {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
            _ => writeln!(buf, "{}", record.args()),
        });
    }
    builder.target(env_logger::Target::Stdout).init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Build {
            export,
            database,
            share_root,
        } => commands::build::run_build_command(
            config_path,
            export,
            database,
            share_root,
            cli.quiet,
        ),
        Commands::Lookup { setname, database } => {
            commands::lookup::run_lookup(config_path, &setname, database)
        }
        Commands::Stats { database } => commands::stats::run_stats(config_path, database),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(config_path),
            ConfigAction::Path => {
                commands::config::run_config_path(config_path);
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
