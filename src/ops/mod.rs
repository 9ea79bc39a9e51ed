//! High-level operations.
//!
//! This module contains the implementation of toolvars commands.

pub mod resolve;

pub use resolve::{ComponentSpec, ResolvedToolchainConfig, ToolchainSession};
