//! Domain Layer
//!
//! Types and interfaces shared by every pipeline stage, without I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (ExcludeSet, relative path helpers)
//! - `ports/` - Interface definitions for infrastructure (processes, SSH, minifier, events)
//!
//! All process, network and transform I/O goes through the trait-defined ports
//! so the pipeline can run against in-memory fakes.

pub mod ports;
pub mod value_objects;
