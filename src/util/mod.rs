//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod errors;

pub use config::ToolchainFile;
pub use diagnostic::Diagnostic;
pub use errors::{ConfigurationError, VariableError};
