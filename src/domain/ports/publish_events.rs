//! Publish Event Port
//!
//! Provides an observable interface for a publish run.
//! Enables progress reporting, JSON event streams, and test assertions.

use std::path::PathBuf;

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadingConfig,
    Building,
    Minifying,
    CleaningRemote,
    Uploading,
    CleaningLocal,
    PostCommands,
}

impl Stage {
    /// Heading printed when the stage starts
    pub fn heading(self) -> &'static str {
        match self {
            Stage::LoadingConfig => "Loading publish configuration...",
            Stage::Building => "Publishing...",
            Stage::Minifying => "Minifying assets...",
            Stage::CleaningRemote => "Cleaning up remote...",
            Stage::Uploading => "Publishing content...",
            Stage::CleaningLocal => "Cleaning up local...",
            Stage::PostCommands => "Executing post publish commands...",
        }
    }

    /// Stable identifier for machine-readable output
    pub fn id(self) -> &'static str {
        match self {
            Stage::LoadingConfig => "config",
            Stage::Building => "build",
            Stage::Minifying => "minify",
            Stage::CleaningRemote => "remote_cleanup",
            Stage::Uploading => "upload",
            Stage::CleaningLocal => "local_cleanup",
            Stage::PostCommands => "post_commands",
        }
    }
}

/// Event emitted during a publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    StageStarted(Stage),

    /// Non-fatal manifest problem
    ConfigWarning { message: String },

    /// File rewritten in place by a minify transform
    Minified { path: PathBuf },

    /// Remote file or directory about to be deleted
    RemoteDeleted { path: String },

    /// Remote or local path skipped because of the exclude set
    Excluded { path: String },

    DirectoryCreated { path: String },

    FileUploaded { path: String },

    /// Post-deploy command finished (whatever its exit status)
    CommandExecuted {
        command: String,
        exit_status: Option<i32>,
        output: Option<String>,
    },

    Completed {
        minified: usize,
        uploaded: usize,
        deleted: usize,
    },
}

/// Trait for receiving publish events
///
/// Implementations:
/// - ConsoleEventSink: human-readable progress
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait PublishEventSink {
    fn on_event(&self, event: PublishEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PublishEventSink for NoopEventSink {
    fn on_event(&self, _event: PublishEvent) {}
}
