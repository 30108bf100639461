//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mister-arcade")]
#[command(about = "Build and query a MiSTer arcade game database", long_about = None)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.config/mister-arcade/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Rebuild the database from the metadata export and .mra files
    Build {
        /// MAME -listxml output or LaunchBox MAME.xml
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Database file to create (replaced if it exists)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Where the MiSTer SD card is mounted or shared
        #[arg(short, long)]
        share_root: Option<PathBuf>,
    },

    /// Show the playable variants of a game
    Lookup {
        /// MAME set name (e.g., sf2)
        setname: String,

        /// Database file (default from config)
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show database statistics
    Stats {
        /// Database file (default from config)
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,
}
