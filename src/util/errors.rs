//! Fatal error types for a resolution pass.
//!
//! Anything in here aborts the pass. Missing interface libraries are not
//! errors; they degrade to a [`Diagnostic`](crate::util::Diagnostic).

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Error reading or writing a variable in a [`VariableStore`](crate::core::VariableStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error("variable `{name}` is not set")]
    NotFound { name: String },

    #[error("variable `{name}` holds a scalar, expected a list")]
    NotAList { name: String },

    #[error("variable `{name}` holds a list, expected a scalar")]
    NotAScalar { name: String },
}

/// Fatal configuration problem, reported before or during a resolution pass.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigurationError {
    #[error("install root for `{component}` is not set (${var} is unset or empty)")]
    #[diagnostic(
        code(toolvars::config::missing_install_root),
        help("Load the `{component}` module or export {var}")
    )]
    MissingInstallRoot { component: String, var: String },

    #[error("invalid version `{version}` for `{component}`: {reason}")]
    #[diagnostic(code(toolvars::config::invalid_version))]
    InvalidVersion {
        component: String,
        version: String,
        reason: String,
    },

    #[error("unknown option `{key}`")]
    #[diagnostic(
        code(toolvars::config::unknown_option),
        help("Recognized options: usempi (parallel), pic, static")
    )]
    UnknownOption { key: String },

    #[error("invalid value `{value}` for option `{key}`")]
    #[diagnostic(
        code(toolvars::config::invalid_option_value),
        help("Use true/false, yes/no, on/off or 1/0")
    )]
    InvalidOptionValue { key: String, value: String },

    #[error("unknown provider `{name}`")]
    #[diagnostic(
        code(toolvars::config::unknown_provider),
        help("Run `toolvars providers` to list supported providers")
    )]
    UnknownProvider { name: String },

    #[error("`{component}` requires `{name}`, which was not provided")]
    #[diagnostic(code(toolvars::config::missing_prerequisite))]
    MissingPrerequisite { component: String, name: String },

    #[error(transparent)]
    #[diagnostic(code(toolvars::config::variable))]
    Variable(#[from] VariableError),
}
