//! Command-line interface implementation for the repackager.
//! Provides argument parsing and help text formatting using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for the repackager.
#[derive(Parser, Debug)]
#[command(version, about = "Repackager: scaffold a new CLI from the my-ts-cli template", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress status output
    #[arg(short = 'q', long)]
    pub silent: bool,

    /// Render errors with terminal styling
    #[arg(long, value_name = "BOOL")]
    pub pretty_errors: Option<bool>,

    /// Local template working tree used by the "copy local" choice
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Remote template repository cloned for tagged versions
    #[arg(long, value_name = "URL")]
    pub repository: Option<String>,

    /// Directory in which the new project directory is created
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of workers used while replacing identifiers
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Replace the target directory if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Offer the version picker regardless of the execution mode
    #[arg(long)]
    pub dev: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// Exits through clap's error handling on invalid input.
pub fn get_args() -> Args {
    Args::parse()
}
