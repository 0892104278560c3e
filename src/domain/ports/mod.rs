//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod asset_transformer;
pub mod command_runner;
pub mod publish_events;
pub mod remote_connector;
pub mod remote_file_system;
pub mod remote_shell;

pub use asset_transformer::{AssetKind, AssetTransformer};
pub use command_runner::{CommandError, CommandOutput, CommandRunner, CommandSpec};
pub use publish_events::{NoopEventSink, PublishEvent, PublishEventSink, Stage};
pub use remote_connector::RemoteConnector;
pub use remote_file_system::{RemoteEntry, RemoteEntryKind, RemoteFileSystem, TransferError};
pub use remote_shell::{RemoteCommandResult, RemoteShell};
