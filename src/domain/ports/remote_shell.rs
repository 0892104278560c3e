//! RemoteShell port - command execution on the remote host

use super::remote_file_system::TransferError;

/// Outcome of one remote command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCommandResult {
    pub command: String,
    /// Exit code; `None` when the remote side reported none
    pub exit_status: Option<i32>,
    pub output: String,
    pub error: String,
}

impl RemoteCommandResult {
    pub fn success(&self) -> bool {
        self.exit_status == Some(0)
    }

    /// Captured stdout and stderr, or `None` when both are blank
    pub fn visible_output(&self) -> Option<String> {
        let parts: Vec<&str> = [self.output.trim_end(), self.error.trim_end()]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}

/// Remote execution capability of a connected session
pub trait RemoteShell {
    /// Run `command` to completion. A non-zero exit is a result, not an error.
    fn run(&self, command: &str) -> Result<RemoteCommandResult, TransferError>;
}
