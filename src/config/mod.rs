//! Manifest model and loading
//!
//! The manifest is a JSON file named `.publisher` in the project root.
//! It is read once at start and never mutated afterwards.

mod loader;
mod types;

pub use loader::{
    load, load_with_warnings, manifest_path, parse, ConfigWarning, MANIFEST_FILE_NAME,
};
pub use types::{Authentication, HostSpec, PublishConfig, UploadConfig, DEFAULT_SSH_PORT};
