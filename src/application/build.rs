//! Build invocation
//!
//! Runs `<tool> publish ...` in the project root and turns a non-zero exit
//! into a `Build` error carrying the captured output.

use std::path::Path;

use crate::config::PublishConfig;
use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::{PublishError, PublishResult};

/// The build command for a project and its absolute output directory.
pub fn build_command(project_root: &Path, output_dir: &Path, config: &PublishConfig) -> CommandSpec {
    let spec = CommandSpec::new(config.build_tool.as_str())
        .arg("publish")
        .arg("--configuration")
        .arg(config.publish_configuration.as_str())
        .arg("--output")
        .arg(output_dir.display().to_string())
        .arg("--self-contained")
        .arg(config.self_contained.to_string())
        .current_dir(project_root);

    // An empty runtime would make the tool reject `--runtime ""`
    if config.publish_runtime.is_empty() {
        spec
    } else {
        spec.arg("--runtime").arg(config.publish_runtime.as_str())
    }
}

/// Run the build and wait for it.
pub fn build(
    runner: &dyn CommandRunner,
    project_root: &Path,
    output_dir: &Path,
    config: &PublishConfig,
) -> PublishResult<CommandOutput> {
    let spec = build_command(project_root, output_dir, config);
    tracing::info!(command = %spec.display_line(), "invoking build");

    let output = runner.run(&spec).map_err(|e| PublishError::Build {
        tool: config.build_tool.clone(),
        output: e.to_string(),
    })?;

    if !output.success() {
        tracing::debug!(status = %output.status_text(), "build failed");
        return Err(PublishError::Build {
            tool: config.build_tool.clone(),
            output: output.combined(),
        });
    }

    Ok(output)
}
