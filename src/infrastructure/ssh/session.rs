//! SSH control-master session
//!
//! Drives the system `ssh` client. `connect` authenticates once and leaves an
//! OpenSSH control master running in the background; every later command is
//! multiplexed over its socket, so password prompts happen only once.
//! The master is told to exit when the session is dropped.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::{Authentication, UploadConfig};
use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec, TransferError};

const SSH_PROGRAM: &str = "ssh";
const SSHPASS_PROGRAM: &str = "sshpass";

/// Quote a string for safe use in a remote POSIX shell command
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Connection parameters derived from the upload settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    /// `user@host` or `host`
    pub destination: String,
    pub port: u16,
    pub authentication: Authentication,
}

impl SshTarget {
    pub fn from_upload(upload: &UploadConfig) -> Result<Self, TransferError> {
        let port = upload.port().map_err(TransferError::Connection)?;
        Ok(Self {
            destination: upload.ssh_target(),
            port,
            authentication: upload.authentication(),
        })
    }
}

/// An open, multiplexed SSH connection
pub struct SshSession {
    runner: Arc<dyn CommandRunner>,
    target: SshTarget,
    control_path: PathBuf,
    connected: bool,
    // Holds the control socket; removed after the master exits.
    _control_dir: TempDir,
}

impl SshSession {
    /// Authenticate and start the control master.
    pub fn connect(runner: Arc<dyn CommandRunner>, target: SshTarget) -> Result<Self, TransferError> {
        let control_dir = tempfile::Builder::new()
            .prefix("publisher-ssh-")
            .tempdir()
            .map_err(|e| TransferError::Connection(format!("cannot create control directory: {}", e)))?;
        let control_path = control_dir.path().join("master");

        let mut session = Self {
            runner,
            target,
            control_path,
            connected: false,
            _control_dir: control_dir,
        };

        let spec = session.master_spec();
        tracing::info!(
            destination = %session.target.destination,
            port = session.target.port,
            "connecting"
        );
        let output = session
            .runner
            .run(&spec)
            .map_err(|e| TransferError::Connection(e.to_string()))?;

        if !output.success() {
            return Err(TransferError::Connection(format!(
                "ssh to {} failed: {}",
                session.target.destination,
                output.combined().trim()
            )));
        }

        session.connected = true;
        Ok(session)
    }

    pub fn target(&self) -> &SshTarget {
        &self.target
    }

    pub fn control_path(&self) -> &Path {
        &self.control_path
    }

    fn control_path_arg(&self) -> String {
        format!("ControlPath={}", self.control_path.display())
    }

    /// Command that authenticates and leaves a persistent master behind.
    fn master_spec(&self) -> CommandSpec {
        let mut ssh_args = vec![
            "-o".to_string(),
            "ControlMaster=yes".to_string(),
            "-o".to_string(),
            "ControlPersist=yes".to_string(),
            "-o".to_string(),
            self.control_path_arg(),
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            "-p".to_string(),
            self.target.port.to_string(),
        ];

        let spec = match &self.target.authentication {
            Authentication::PrivateKey(key) => {
                ssh_args.extend([
                    "-i".to_string(),
                    key.display().to_string(),
                    "-o".to_string(),
                    "IdentitiesOnly=yes".to_string(),
                    "-o".to_string(),
                    "BatchMode=yes".to_string(),
                ]);
                CommandSpec::new(SSH_PROGRAM)
            }
            Authentication::Password(password) => {
                ssh_args.extend([
                    "-o".to_string(),
                    "PreferredAuthentications=password,keyboard-interactive".to_string(),
                    "-o".to_string(),
                    "PubkeyAuthentication=no".to_string(),
                ]);
                // sshpass -e reads the password from SSHPASS
                CommandSpec::new(SSHPASS_PROGRAM)
                    .args(["-e", SSH_PROGRAM])
                    .env("SSHPASS", password.as_str())
            }
        };

        spec.args(ssh_args)
            .arg(self.target.destination.as_str())
            .arg("true")
    }

    /// Command running `remote_command` over the existing master.
    fn exec_spec(&self, remote_command: &str) -> CommandSpec {
        CommandSpec::new(SSH_PROGRAM)
            .args(["-o", "ControlMaster=no", "-o"])
            .arg(self.control_path_arg())
            .args(["-o", "BatchMode=yes", "-p"])
            .arg(self.target.port.to_string())
            .arg(self.target.destination.as_str())
            .arg("--")
            .arg(remote_command)
    }

    /// Run a remote shell command and capture its output.
    pub fn exec(&self, remote_command: &str) -> Result<CommandOutput, TransferError> {
        self.runner
            .run(&self.exec_spec(remote_command))
            .map_err(|e| TransferError::Connection(e.to_string()))
    }

    /// Run a remote shell command with `input` on its standard input.
    pub fn exec_with_input(
        &self,
        remote_command: &str,
        input: &mut dyn Read,
    ) -> Result<CommandOutput, TransferError> {
        self.runner
            .run_with_input(&self.exec_spec(remote_command), input)
            .map_err(|e| TransferError::Connection(e.to_string()))
    }

    /// Stop the control master. Failures are logged, never returned.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;

        let spec = CommandSpec::new(SSH_PROGRAM)
            .arg("-o")
            .arg(self.control_path_arg())
            .args(["-O", "exit"])
            .arg(self.target.destination.as_str());

        match self.runner.run(&spec) {
            Ok(output) if output.success() => {
                tracing::debug!(destination = %self.target.destination, "disconnected")
            }
            Ok(output) => tracing::warn!(
                destination = %self.target.destination,
                "ssh master did not exit cleanly: {}",
                output.combined().trim()
            ),
            Err(e) => tracing::warn!("failed to stop ssh master: {}", e),
        }
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        self.disconnect();
    }
}
