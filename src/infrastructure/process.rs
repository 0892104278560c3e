//! System process runner
//!
//! Implements the CommandRunner port with `std::process::Command`.

use std::io::{self, Read};
use std::process::{Command, Output, Stdio};

use crate::domain::ports::{CommandError, CommandOutput, CommandRunner, CommandSpec};

/// Runs commands as real child processes, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd
    }

    fn spawn_error(spec: &CommandSpec, source: io::Error) -> CommandError {
        CommandError::Spawn {
            program: spec.program.clone(),
            source,
        }
    }

    fn capture(output: Output) -> CommandOutput {
        CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        tracing::debug!(command = %spec.display_line(), "running");

        let output = Self::command(spec)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::spawn_error(spec, e))?;

        let output = Self::capture(output);
        tracing::debug!(status = %output.status_text(), "finished");
        Ok(output)
    }

    fn run_with_input(
        &self,
        spec: &CommandSpec,
        input: &mut dyn Read,
    ) -> Result<CommandOutput, CommandError> {
        tracing::debug!(command = %spec.display_line(), "running with input");

        let mut child = Self::command(spec)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| Self::spawn_error(spec, e))?;

        // stdin is dropped at the end of the block so the child sees EOF
        let streamed = match child.stdin.take() {
            Some(mut stdin) => io::copy(input, &mut stdin).map(|_| ()),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| Self::spawn_error(spec, e))?;
        let output = Self::capture(output);

        match streamed {
            Ok(()) => Ok(output),
            // the child stopped reading; its status and stderr say why
            Err(source) if !output.success() => {
                tracing::debug!(error = %source, status = %output.status_text(), "input cut short");
                Ok(output)
            }
            Err(source) => Err(CommandError::Input {
                program: spec.program.clone(),
                source,
            }),
        }
    }
}
