//! Common test utilities for Quire integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated site layout in temp directories plus a CLI runner
//! - Fixtures: Reusable page, manifest and navigation content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
