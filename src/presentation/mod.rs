//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Diagnostic logging setup (via tracing-subscriber)
//! - Creating the publisher with infrastructure dependencies
//!
//! ## Usage
//!
//! ```ignore
//! use publisher::presentation::factory;
//!
//! let publisher = factory::create_publisher(false);
//! let report = publisher.run(project_root)?;
//! ```

pub mod cli;
pub mod factory;
pub mod logging;

pub use cli::Cli;
pub use factory::{create_event_sink, create_publisher};
