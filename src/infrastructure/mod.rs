//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all process, network and terminal I/O.
//!
//! ## Structure
//!
//! - `process` - Child processes via `std::process`
//! - `ssh/` - File transfer and remote commands over the system `ssh` client
//! - `minify` - CSS/JS transforms backed by the `minifier` crate
//! - `events/` - Event sinks (console, NDJSON)

pub mod events;
pub mod minify;
pub mod process;
pub mod ssh;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use minify::MinifierTransformer;
pub use process::SystemCommandRunner;
pub use ssh::{SshConnector, SshFileTransfer, SshSession, SshShell};
