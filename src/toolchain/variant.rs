//! Provider strategies.
//!
//! Each supported provider implements [`ComponentVariant`]. A variant is
//! built from typed [`Prerequisites`]; anything it cannot work without is
//! checked at construction, so `set_variables` never has to probe for
//! configuration that a sibling component was supposed to provide.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::component::{Component, Provider};
use crate::core::options::OptionSet;
use crate::core::variables::{Value, VariableStore};
use crate::toolchain::gate::BehaviorVariant;
use crate::util::diagnostic::Diagnostic;
use crate::util::errors::ConfigurationError;

/// Library layout published by the BLAS/LAPACK provider of the toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BlasPrerequisites {
    /// Library directories, relative to the provider's install root
    pub lib_dirs: Option<Vec<PathBuf>>,
    /// Include directories, relative to the provider's install root
    pub include_dirs: Vec<PathBuf>,
    /// BLAS libraries, grouped as published
    pub libs: Vec<Vec<String>>,
    /// BLACS libraries, grouped as published
    pub blacs_libs: Vec<Vec<String>>,
}

/// Everything a resolution pass gets from outside its own component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prerequisites {
    /// Generic compiler variables (`CC`, `CXX`, ..., `LDFLAGS`)
    pub compiler: BTreeMap<String, Value>,
    /// BLAS provider layout, when the toolchain has one
    pub blas: Option<BlasPrerequisites>,
}

/// What a variant sees while computing its variables.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub component: &'a Component,
    pub options: &'a OptionSet,
    pub variant: BehaviorVariant,
}

/// Result of running a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOutcome {
    /// False when optional libraries had to be left out
    pub usable: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl VariantOutcome {
    pub fn usable() -> Self {
        VariantOutcome {
            usable: true,
            diagnostics: Vec::new(),
        }
    }
}

/// Computes the resolved variables of one provider.
pub trait ComponentVariant: Send + Sync + fmt::Debug {
    /// The provider this variant implements.
    fn provider(&self) -> Provider;

    /// Write this provider's variables into `store`.
    fn set_variables(
        &self,
        ctx: &ResolveContext<'_>,
        store: &mut VariableStore,
    ) -> Result<VariantOutcome, ConfigurationError>;
}
