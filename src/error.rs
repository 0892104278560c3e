//! Error types for publisher
//!
//! Uses `thiserror` for library errors. The binary wraps them in `anyhow`
//! and maps every one of them to exit code 1.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::TransferError;

/// Result type alias for publisher operations
pub type PublishResult<T> = Result<T, PublishError>;

/// Main error type for a publish run
#[derive(Error, Debug)]
pub enum PublishError {
    /// Bad or missing command-line argument
    #[error("{0}")]
    Usage(String),

    /// The manifest file does not exist in the project directory
    #[error("no manifest file could be found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// The manifest exists but failed structural or value validation
    #[error("invalid manifest {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// The build tool could not be started or exited non-zero
    #[error("{tool} publish CLI error: {output}")]
    Build { tool: String, output: String },

    /// A minification transform rejected its input
    #[error("failed to minify {file}: {message}")]
    Minify { file: PathBuf, message: String },

    /// The build finished but left no output tree to upload
    #[error("publish output not found at {path}")]
    OutputMissing { path: PathBuf },

    /// Connection or I/O failure while talking to the remote host
    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// A post-deploy command exited non-zero while strict mode was enabled
    #[error("remote command `{command}` failed with status {status}")]
    RemoteCommand {
        command: String,
        status: String,
        output: String,
    },

    /// Local IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PublishError {
    /// Build a `Config` error for the given manifest file
    pub fn config(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            file: file.into(),
            message: message.into(),
        }
    }
}
