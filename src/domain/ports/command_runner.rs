//! CommandRunner port - abstraction over child processes
//!
//! The build invoker and the SSH adapters describe the process they want as a
//! [`CommandSpec`] and get back captured output, so tests can substitute a
//! runner that never spawns anything.

use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

/// A process invocation: program, arguments, working directory and extra env.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Render as a single command line for logs and error messages.
    ///
    /// Arguments containing whitespace or quotes are wrapped in double quotes
    /// with embedded quotes escaped. Env values are never rendered.
    pub fn display_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| quote_arg(part))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if arg.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Standard output followed by standard error
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }

    /// Exit status rendered for messages ("2", or "signal" when killed)
    pub fn status_text(&self) -> String {
        self.status
            .map(|code| code.to_string())
            .unwrap_or_else(|| "signal".to_string())
    }
}

/// Process could not be run to completion
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to stream input to `{program}`: {source}")]
    Input {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs a process to completion and captures its output
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError>;

    /// Run with `input` streamed to the process's standard input.
    fn run_with_input(
        &self,
        spec: &CommandSpec,
        input: &mut dyn Read,
    ) -> Result<CommandOutput, CommandError>;
}
