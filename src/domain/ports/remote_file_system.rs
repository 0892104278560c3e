//! RemoteFileSystem port - the file-transfer session used by the mirror
//!
//! Paths are remote paths with `/` separators. Implementations:
//! - `SshFileTransfer` - commands multiplexed over an SSH control connection
//! - in-memory fakes in tests

use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of a remote node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteEntryKind {
    File,
    Directory,
}

/// A remote filesystem node returned by [`RemoteFileSystem::list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub full_path: String,
    pub kind: RemoteEntryKind,
}

impl RemoteEntry {
    pub fn file(name: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            kind: RemoteEntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            kind: RemoteEntryKind::Directory,
        }
    }

    /// `.` and `..`
    pub fn is_pseudo(&self) -> bool {
        self.name == "." || self.name == ".."
    }

    pub fn is_dir(&self) -> bool {
        self.kind == RemoteEntryKind::Directory
    }
}

/// Failure talking to the remote host or reading local upload sources
#[derive(Debug, Error)]
pub enum TransferError {
    /// Session could not be established or was lost
    #[error("connection error: {0}")]
    Connection(String),

    /// A remote operation was rejected
    #[error("{operation} {path} failed: {message}")]
    Remote {
        operation: &'static str,
        path: String,
        message: String,
    },

    /// A local file could not be read for upload
    #[error("cannot read {path}: {source}")]
    Local {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransferError {
    pub fn remote(operation: &'static str, path: &str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// File-transfer capability of a connected session
pub trait RemoteFileSystem {
    /// Entries directly inside `dir`. A missing directory lists as empty.
    fn list(&self, dir: &str) -> Result<Vec<RemoteEntry>, TransferError>;

    /// Create a directory and missing parents; existing directories are fine.
    fn create_dir(&self, path: &str) -> Result<(), TransferError>;

    fn remove_file(&self, path: &str) -> Result<(), TransferError>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &str) -> Result<(), TransferError>;

    /// Write the full contents of `source` to `path`, replacing any existing file.
    fn upload(&self, source: &mut dyn Read, path: &str) -> Result<(), TransferError>;
}
