//! Application Layer
//!
//! The publish stages and the orchestrator that sequences them.
//! This layer:
//! - Depends on Domain layer (ports, value objects)
//! - Receives infrastructure through the ports, never constructs it
//!
//! ## Stages
//!
//! - `build` - Run the external build and surface its output on failure
//! - `minify` - Resolve minify rules and rewrite assets in place
//! - `mirror` - Delete-then-upload mirror of the output tree
//! - `post_deploy` - Remote commands after the mirror
//! - `pipeline` - `Publisher`, the orchestrator

pub mod build;
pub mod minify;
pub mod mirror;
pub mod pipeline;
pub mod post_deploy;

pub use build::{build, build_command};
pub use minify::{minify_file, resolve_targets, MinifyTask};
pub use mirror::{cleanup_output, MirrorSummary, RemoteMirror};
pub use pipeline::{PublishReport, Publisher};
pub use post_deploy::run_post_commands;
