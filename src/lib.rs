//! toolvars - toolchain variable resolution for MPI and FFT components
//!
//! This crate turns a detected component (provider, version, install root)
//! plus a set of toolchain options into the build variables a compiler
//! toolchain exports: wrapper commands, include and library directories,
//! and link flags.

pub mod core;
pub mod ops;
pub mod toolchain;
pub mod util;

/// Test utilities for toolvars unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides throwaway install trees and prerequisite
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    component::Component, component::Provider, options::OptionSet, variables::Value,
    variables::VariableStore, version::Version,
};
pub use ops::{ComponentSpec, ResolvedToolchainConfig, ToolchainSession};
pub use toolchain::{BehaviorVariant, Prerequisites, VariantRegistry};
pub use util::errors::{ConfigurationError, VariableError};
