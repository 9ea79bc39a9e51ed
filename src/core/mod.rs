//! Core data structures for toolvars.
//!
//! This module contains the foundational types used throughout toolvars:
//! - Component identity (provider, version, install root)
//! - Toolchain options
//! - The variable store shared by all resolution steps

pub mod component;
pub mod options;
pub mod variables;
pub mod version;

pub use component::{Component, ComponentKind, Provider};
pub use options::OptionSet;
pub use variables::{Value, VariableStore};
pub use version::Version;
