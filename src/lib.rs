//! Publisher - build, minify and mirror a project to a remote host
//!
//! One command runs the project's build tool, minifies CSS and JS assets in
//! the output, replaces the remote destination with the output tree over SSH
//! and runs post-deploy commands there. Everything is driven by the
//! `.publisher` manifest in the project root.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{PublishReport, Publisher};
pub use config::{PublishConfig, UploadConfig};
pub use error::{PublishError, PublishResult};
