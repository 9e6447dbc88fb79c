//! Command-line interface definitions.
//!
//! Defines the CLI structure for the addrlink application using `clap`:
//! analyse an address list, inspect saved progress, or discard it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default configuration file, read when present.
pub const DEFAULT_CONFIG: &str = "addrlink.toml";

/// Address interaction clustering and whitelist scoring
#[derive(Parser, Debug)]
#[command(name = "addrlink")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file [default: addrlink.toml when present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse an address list, resuming saved progress
    Run(RunArgs),

    /// Show saved progress and cache contents
    Status,

    /// Delete saved progress
    Reset(ResetArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Address list: one address per line, `Cluster ...` lines start a label
    pub input: PathBuf,

    /// Report file (default: addrlink_report_<timestamp>.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Discard any saved checkpoint before starting
    #[arg(long)]
    pub fresh: bool,

    /// Delete the cache after a successful run
    #[arg(long)]
    pub clear_cache: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Override the interaction threshold
    #[arg(long)]
    pub threshold: Option<u32>,
}

/// Arguments for the `reset` subcommand.
#[derive(Parser, Debug)]
pub struct ResetArgs {
    /// Also delete the result cache
    #[arg(long)]
    pub cache: bool,
}
