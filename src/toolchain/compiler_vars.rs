//! Vendor-prefixed copies of the generic compiler variables.
//!
//! MPI wrappers such as Open MPI's `mpicc` pick the underlying compiler up
//! from `OMPI_CC` and friends. Those copies must be taken before `CC` is
//! overridden with the wrapper name, otherwise the wrapper would end up
//! calling itself.

use crate::core::variables::VariableStore;
use crate::util::errors::VariableError;

/// A recognized compiler variable: read from `source`, written as
/// `<prefix><target>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerVariable {
    pub source: &'static str,
    pub target: &'static str,
}

impl CompilerVariable {
    const fn same(name: &'static str) -> Self {
        CompilerVariable {
            source: name,
            target: name,
        }
    }
}

/// The compiler variables that get vendor-prefixed copies.
pub const COMPILER_VARIABLES: [CompilerVariable; 6] = [
    CompilerVariable::same("CC"),
    CompilerVariable::same("CXX"),
    CompilerVariable::same("F77"),
    CompilerVariable::same("F90"),
    CompilerVariable::same("FC"),
    CompilerVariable::same("LDFLAGS"),
];

/// Names of the compiler commands among [`COMPILER_VARIABLES`].
pub const COMPILER_COMMANDS: [&str; 5] = ["CC", "CXX", "F77", "F90", "FC"];

/// Write `<prefix><target>` for every recognized compiler variable.
///
/// Only the first value of a list-valued source is carried over; an empty
/// list maps to an empty string. Existing prefixed variables are
/// overwritten, so running this twice yields the same store.
pub fn map_compiler_variables(
    store: &mut VariableStore,
    prefix: &str,
) -> Result<(), VariableError> {
    for var in COMPILER_VARIABLES {
        let value = store.first(var.source)?.unwrap_or_default().to_string();
        let name = format!("{}{}", prefix, var.target);
        tracing::debug!("{} = {:?} (from {})", name, value, var.source);
        store.set_scalar(name, value);
    }
    Ok(())
}
