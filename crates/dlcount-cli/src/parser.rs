//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Count PixelBuilds release downloads and report the daily growth.
#[derive(Debug, Parser)]
#[command(name = "dlcount")]
#[command(version)]
#[command(about = "Tally PixelBuilds release downloads across GitHub and Gitea")]
pub struct Cli {
    /// Directory holding `downloads.json` and `available_downloads.json`
    #[arg(long = "data-dir", env = "DLCOUNT_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Environment file with credentials, loaded if present
    #[arg(long = "env-file", default_value = "config.env")]
    pub env_file: PathBuf,

    /// Compute and print the report without writing ledgers or notifying
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
