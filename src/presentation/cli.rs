//! CLI Argument Parsing
//!
//! `PROJECT_DIR` is optional at the clap level: a missing directory is
//! reported as a usage error with exit code 1, not clap's exit code 2.

use std::path::PathBuf;

use clap::Parser;

/// Build, minify and deploy a project described by its `.publisher` manifest
#[derive(Parser, Debug)]
#[command(name = "publisher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory containing the `.publisher` manifest
    pub project: Option<PathBuf>,

    /// Output progress as NDJSON events
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
