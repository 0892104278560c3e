//! SSH Remote Access
//!
//! Implements the remote ports on top of the system OpenSSH client.
//! Each opened capability owns a separate control-master session, so the
//! transfer phase and the post-deploy commands use independent connections.

mod session;
mod shell;
mod transfer;

pub use session::{shell_quote, SshSession, SshTarget};
pub use shell::SshShell;
pub use transfer::SshFileTransfer;

use std::sync::Arc;

use crate::config::UploadConfig;
use crate::domain::ports::{
    CommandRunner, RemoteConnector, RemoteFileSystem, RemoteShell, TransferError,
};

/// Opens SSH-backed sessions for an upload target
pub struct SshConnector {
    runner: Arc<dyn CommandRunner>,
}

impl SshConnector {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn session(&self, upload: &UploadConfig) -> Result<SshSession, TransferError> {
        SshSession::connect(self.runner.clone(), SshTarget::from_upload(upload)?)
    }
}

impl RemoteConnector for SshConnector {
    fn open_transfer(
        &self,
        upload: &UploadConfig,
    ) -> Result<Box<dyn RemoteFileSystem>, TransferError> {
        Ok(Box::new(SshFileTransfer::new(self.session(upload)?)))
    }

    fn open_shell(&self, upload: &UploadConfig) -> Result<Box<dyn RemoteShell>, TransferError> {
        Ok(Box::new(SshShell::new(self.session(upload)?)))
    }
}
