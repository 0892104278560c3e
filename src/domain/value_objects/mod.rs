//! Domain Value Objects
//!
//! Immutable value types used by the mirror and minify stages.

mod exclude_set;
mod relative_path;

pub use exclude_set::ExcludeSet;
pub use relative_path::{join_remote, relative_posix, relative_remote};
