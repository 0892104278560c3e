//! Publisher CLI
//!
//! Usage: publisher [OPTIONS] [PROJECT_DIR]
//!
//! Exits 0 on success and 1 on any error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use publisher::presentation::{factory, logging, Cli};
use publisher::PublishError;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not errors
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let project = project_dir(cli.project)?;
    std::env::set_current_dir(&project)
        .with_context(|| format!("cannot enter {}", project.display()))?;

    let publisher = factory::create_publisher(cli.json);
    let report = publisher.run(&project)?;
    tracing::info!(
        minified = report.minified,
        uploaded = report.uploaded(),
        deleted = report.deleted(),
        commands = report.commands.len(),
        "publish finished"
    );
    Ok(())
}

/// Validate the positional argument and make it absolute.
fn project_dir(arg: Option<PathBuf>) -> Result<PathBuf, PublishError> {
    let dir = arg.ok_or_else(|| {
        PublishError::Usage("A directory was expected, but you didn't give me one..".to_string())
    })?;
    if !dir.is_dir() {
        return Err(PublishError::Usage(format!(
            "Directory does not exist: {}",
            dir.display()
        )));
    }
    Ok(dir.canonicalize()?)
}
