//! RemoteConnector port - opens the two remote sessions
//!
//! The file-transfer session and the command session are independent
//! connections. Each is disconnected when the returned box is dropped.

use crate::config::UploadConfig;

use super::remote_file_system::{RemoteFileSystem, TransferError};
use super::remote_shell::RemoteShell;

pub trait RemoteConnector {
    fn open_transfer(
        &self,
        upload: &UploadConfig,
    ) -> Result<Box<dyn RemoteFileSystem>, TransferError>;

    fn open_shell(&self, upload: &UploadConfig) -> Result<Box<dyn RemoteShell>, TransferError>;
}
