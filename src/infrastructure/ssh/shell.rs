//! Remote command execution over an SSH session

use crate::domain::ports::{RemoteCommandResult, RemoteShell, TransferError};

use super::session::SshSession;

pub struct SshShell {
    session: SshSession,
}

impl SshShell {
    pub fn new(session: SshSession) -> Self {
        Self { session }
    }
}

impl RemoteShell for SshShell {
    fn run(&self, command: &str) -> Result<RemoteCommandResult, TransferError> {
        let output = self.session.exec(command)?;
        Ok(RemoteCommandResult {
            command: command.to_string(),
            exit_status: output.status,
            output: output.stdout,
            error: output.stderr,
        })
    }
}
