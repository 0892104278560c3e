//! Common test utilities for publisher integration tests.
//!
//! This module provides:
//! - `TestProject`: isolated project directory with a manifest
//! - In-memory fakes for every port the publisher talks through
//! - Fixtures: reusable manifests

#![allow(dead_code)]

pub mod fakes;
pub mod project;

#[allow(unused_imports)]
pub use fakes::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use project::*;
